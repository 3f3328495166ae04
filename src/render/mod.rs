//! Icon rendering: three geometric strategies behind one dispatch.
//!
//! Each [`IconSpec`] carries a [`Strategy`], a tagged value holding only the
//! parameters its transform needs. [`Strategy::apply`] is the single dispatch
//! point; every strategy lives in its own module and implements
//! [`Transform`].
//!
//! Every transform paints onto a canvas created at exactly the target size,
//! so no strategy can emit an off-size image.

pub mod crop;
pub mod fit;
pub mod pad;

pub use crop::CroppedRegion;
pub use fit::StandardFit;
pub use pad::{Background, PaddedComposite};

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, Rgba, Rgba32FImage, RgbaImage};

use crate::assemble::RenderedIcon;
use crate::color::Rgb;
use crate::error::{GenerateError, RenderError};
use crate::geometry::SizePx;
use crate::registry::IconSpec;
use crate::source::SourceImage;

/// Resampling filter used for every resize.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

// ============================================================================
// Render Context
// ============================================================================

/// Per-request inputs shared by all transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// The caller-supplied (or advised) background for composite strategies.
    pub background: Rgb,
}

impl RenderContext {
    pub fn new(background: Rgb) -> Self {
        Self { background }
    }
}

// ============================================================================
// Transform Trait
// ============================================================================

/// A geometric mapping from a source image onto a fixed-size canvas.
pub trait Transform {
    /// Produces an image of exactly `target` dimensions.
    ///
    /// Implementations must not mutate shared state: identical inputs must
    /// give pixel-identical outputs.
    fn transform(
        &self,
        source: &RgbaImage,
        target: SizePx,
        ctx: &RenderContext,
    ) -> Result<RgbaImage, RenderError>;
}

// ============================================================================
// Strategy
// ============================================================================

/// The transform a spec is rendered with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Scale to fit, letterbox on transparency.
    StandardFit(StandardFit),
    /// Extract a top-right sub-rectangle, then fit it.
    CroppedRegion(CroppedRegion),
    /// Scale into a smaller square, then pad onto a background.
    PaddedComposite(PaddedComposite),
}

impl Strategy {
    pub fn apply(
        &self,
        source: &RgbaImage,
        target: SizePx,
        ctx: &RenderContext,
    ) -> Result<RgbaImage, RenderError> {
        match self {
            Self::StandardFit(s) => s.transform(source, target, ctx),
            Self::CroppedRegion(s) => s.transform(source, target, ctx),
            Self::PaddedComposite(s) => s.transform(source, target, ctx),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::StandardFit(_) => "standard-fit",
            Self::CroppedRegion(_) => "cropped-region",
            Self::PaddedComposite(_) => "padded-composite",
        }
    }
}

// ============================================================================
// IconRenderer
// ============================================================================

/// Renders specs against one decoded source.
#[derive(Debug, Clone, Copy)]
pub struct IconRenderer {
    ctx: RenderContext,
}

impl IconRenderer {
    pub fn new(background: Rgb) -> Self {
        Self {
            ctx: RenderContext::new(background),
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    /// Renders one spec to pixels.
    pub fn render(&self, spec: &IconSpec, source: &SourceImage) -> Result<RgbaImage, RenderError> {
        let target = spec.size();
        let image = spec.strategy.apply(source.pixels(), target, &self.ctx)?;
        debug_assert_eq!(image.dimensions(), (target.width, target.height));
        Ok(image)
    }

    /// Renders one spec to PNG bytes.
    pub fn render_png(&self, spec: &IconSpec, source: &SourceImage) -> Result<Vec<u8>, RenderError> {
        encode_png(&self.render(spec, source)?)
    }

    /// Renders every spec, in the order given.
    ///
    /// The batch is all-or-nothing: the first failure is returned and names
    /// its spec. With the `parallel` feature specs render concurrently, but
    /// the output keeps the input order.
    pub fn render_all(
        &self,
        specs: &[&'static IconSpec],
        source: &SourceImage,
    ) -> Result<Vec<RenderedIcon>, GenerateError> {
        #[cfg(feature = "parallel")]
        let icons = {
            use rayon::prelude::*;
            specs
                .par_iter()
                .map(|&spec| self.render_icon(spec, source))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let icons = specs
            .iter()
            .map(|&spec| self.render_icon(spec, source))
            .collect();

        icons
    }

    fn render_icon(
        &self,
        spec: &'static IconSpec,
        source: &SourceImage,
    ) -> Result<RenderedIcon, GenerateError> {
        let png = self.render_png(spec, source).map_err(|err| {
            log::error!("failed to process {}: {err}", spec.name);
            GenerateError::Render {
                spec: spec.name,
                source: err,
            }
        })?;
        log::debug!(
            "rendered {} ({}x{}, {}) to {} bytes",
            spec.name,
            spec.width,
            spec.height,
            spec.strategy.name(),
            png.len()
        );
        Ok(RenderedIcon::new(spec, png))
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Scales `source` to the largest aspect-preserving size inside `bounds`.
///
/// Sources with any non-opaque pixel are resampled in premultiplied alpha,
/// so the hidden color of transparent pixels never fringes visible edges.
pub fn resize_to_fit(source: &RgbaImage, bounds: SizePx) -> RgbaImage {
    let fitted = SizePx::new(source.width(), source.height()).fit_within(bounds);
    if (fitted.width, fitted.height) == source.dimensions() {
        return source.clone();
    }
    if source.pixels().all(|px| px[3] == 255) {
        return imageops::resize(source, fitted.width, fitted.height, RESIZE_FILTER);
    }

    let premultiplied = Rgba32FImage::from_fn(source.width(), source.height(), |x, y| {
        premultiply(*source.get_pixel(x, y))
    });
    let resized = imageops::resize(&premultiplied, fitted.width, fitted.height, RESIZE_FILTER);
    RgbaImage::from_fn(fitted.width, fitted.height, |x, y| {
        unpremultiply(*resized.get_pixel(x, y))
    })
}

fn premultiply(Rgba([r, g, b, a]): Rgba<u8>) -> Rgba<f32> {
    let alpha = a as f32 / 255.0;
    let channel = |c: u8| c as f32 / 255.0 * alpha;
    Rgba([channel(r), channel(g), channel(b), alpha])
}

fn unpremultiply(Rgba([r, g, b, a]): Rgba<f32>) -> Rgba<u8> {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let alpha = to_u8(a);
    if alpha == 0 {
        return TRANSPARENT;
    }
    let a = a.min(1.0);
    Rgba([to_u8(r / a), to_u8(g / a), to_u8(b / a), alpha])
}

/// Centers `content` on a `target`-sized canvas filled with `background`.
pub fn letterbox(content: &RgbaImage, target: SizePx, background: Rgba<u8>) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(target.width, target.height, background);
    let (x, y) = target.center_offset(SizePx::new(content.width(), content.height()));
    composite_over(&mut canvas, content, x, y);
    canvas
}

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination). Pixels falling
/// outside the destination are dropped.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let (dx, dy) = (x + sx, y + sy);
        if dx >= dest.width() || dy >= dest.height() {
            continue;
        }
        let blended = alpha_blend(*src_pixel, *dest.get_pixel(dx, dy));
        dest.put_pixel(dx, dy, blended);
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match (src[3], dst[3]) {
        (255, _) | (_, 0) => return src,
        (0, _) => return dst,
        _ => {}
    }

    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

/// Encodes RGBA pixels as PNG with fixed encoder settings.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    PngEncoder::new(Cursor::new(&mut buf)).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}
