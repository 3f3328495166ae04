//! Cropped region: cut a top-right window out of the source, then fit it.

use image::{RgbaImage, imageops};

use super::{RenderContext, StandardFit, Transform};
use crate::error::RenderError;
use crate::geometry::{RectPx, SizePx};

/// Extracts a sub-rectangle anchored at the source's top-right corner and
/// renders it with [`StandardFit`].
///
/// The window is `floor(width * width_fraction)` by
/// `floor(height * height_fraction)` pixels. Offsets and extents are whole
/// pixels, so the extraction never lands between pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CroppedRegion {
    pub width_fraction: f64,
    pub height_fraction: f64,
}

impl CroppedRegion {
    pub const fn top_right(width_fraction: f64, height_fraction: f64) -> Self {
        Self {
            width_fraction,
            height_fraction,
        }
    }

    /// The window this strategy extracts from a source of the given size.
    pub fn region(&self, source: SizePx) -> RectPx {
        RectPx::top_right(source, self.width_fraction, self.height_fraction)
    }
}

impl Transform for CroppedRegion {
    fn transform(
        &self,
        source: &RgbaImage,
        target: SizePx,
        ctx: &RenderContext,
    ) -> Result<RgbaImage, RenderError> {
        let rect = self.region(SizePx::new(source.width(), source.height()));
        if rect.is_empty() {
            return Err(RenderError::EmptyRegion {
                width: rect.width,
                height: rect.height,
            });
        }
        let window = imageops::crop_imm(source, rect.x, rect.y, rect.width, rect.height).to_image();
        StandardFit.transform(&window, target, ctx)
    }
}
