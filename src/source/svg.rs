//! SVG rasterization using resvg/usvg.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::DecodeError;

/// Longest side, in pixels, that SVG sources are rasterized to.
///
/// Large enough that every registry target is produced by downscaling.
pub const SVG_RASTER_SIZE: u32 = 2048;

/// Renders SVG bytes to an RGBA image scaled to fit within `size x size`.
///
/// Aspect ratio is preserved: the larger dimension becomes `size`.
pub fn rasterize(svg_data: &[u8], size: u32) -> Result<RgbaImage, DecodeError> {
    let tree = Tree::from_data(svg_data, &Options::default())?;

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = ((svg_size.width() * scale).round() as u32).max(1);
    let height = ((svg_size.height() * scale).round() as u32).max(1);

    let mut pixmap = Pixmap::new(width, height).ok_or(DecodeError::SvgRaster { width, height })?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Copies a premultiplied tiny_skia pixmap into straight-alpha RGBA.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        *dst = unpremultiply(src.red(), src.green(), src.blue(), src.alpha());
    }
    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    if a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let a32 = a as u32;
    let channel = |c: u8| ((c as u32 * 255 + a32 / 2) / a32).min(255) as u8;
    Rgba([channel(r), channel(g), channel(b), a])
}
