//! Standard fit: scale to fit, letterbox onto transparency.

use image::RgbaImage;

use super::{RenderContext, TRANSPARENT, Transform, letterbox, resize_to_fit};
use crate::error::RenderError;
use crate::geometry::SizePx;

/// Scales the whole source, preserving aspect ratio, to fit inside the target
/// and centers it on a transparent canvas. Nothing is cropped or stretched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandardFit;

impl Transform for StandardFit {
    fn transform(
        &self,
        source: &RgbaImage,
        target: SizePx,
        _ctx: &RenderContext,
    ) -> Result<RgbaImage, RenderError> {
        Ok(letterbox(&resize_to_fit(source, target), target, TRANSPARENT))
    }
}
