//! Padded composite: shrink into a centered square, pad onto a background.

use image::{Rgba, RgbaImage};

use super::{RenderContext, TRANSPARENT, Transform, letterbox, resize_to_fit};
use crate::error::RenderError;
use crate::geometry::{SizePx, floor_scale};

/// What fills the padding around a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Transparent,
    /// The background color carried by the [`RenderContext`].
    Requested,
}

impl Background {
    pub fn resolve(&self, ctx: &RenderContext) -> Rgba<u8> {
        match self {
            Self::Transparent => TRANSPARENT,
            Self::Requested => {
                let c = ctx.background;
                Rgba([c.red, c.green, c.blue, 255])
            }
        }
    }
}

/// Fits the source inside a square of side
/// `floor(min(target_w, target_h) * inner_scale)`, then centers it on a
/// target-sized canvas filled with `background`.
///
/// Padding splits floor/ceil on each axis independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddedComposite {
    pub inner_scale: f64,
    pub background: Background,
}

impl PaddedComposite {
    pub const fn transparent(inner_scale: f64) -> Self {
        Self {
            inner_scale,
            background: Background::Transparent,
        }
    }

    pub const fn requested(inner_scale: f64) -> Self {
        Self {
            inner_scale,
            background: Background::Requested,
        }
    }

    /// Side of the square the source is fitted into.
    pub fn inner_side(&self, target: SizePx) -> u32 {
        floor_scale(target.width.min(target.height), self.inner_scale).max(1)
    }
}

impl Transform for PaddedComposite {
    fn transform(
        &self,
        source: &RgbaImage,
        target: SizePx,
        ctx: &RenderContext,
    ) -> Result<RgbaImage, RenderError> {
        let inner = resize_to_fit(source, SizePx::square(self.inner_side(target)));
        Ok(letterbox(&inner, target, self.background.resolve(ctx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::render::tests::solid;

    #[test]
    fn inner_side_uses_shorter_target_side() {
        assert_eq!(PaddedComposite::transparent(0.8).inner_side(SizePx::square(1024)), 819);
        assert_eq!(PaddedComposite::requested(0.5).inner_side(SizePx::new(1284, 2778)), 642);
        assert_eq!(PaddedComposite::transparent(0.1).inner_side(SizePx::square(3)), 1);
    }

    #[test]
    fn transparent_padding_around_content() {
        let source = solid(40, 40, [10, 20, 30, 255]);
        let out = PaddedComposite::transparent(0.8)
            .transform(&source, SizePx::square(100), &RenderContext::new(Rgb::new(1, 2, 3)))
            .unwrap();
        assert_eq!(out.dimensions(), (100, 100));
        // 80px content at offset 10
        assert_eq!(out.get_pixel(5, 50).0, [0, 0, 0, 0]);
        assert_eq!(out.get_pixel(10, 10).0, [10, 20, 30, 255]);
        assert_eq!(out.get_pixel(89, 89).0, [10, 20, 30, 255]);
        assert_eq!(out.get_pixel(90, 90).0, [0, 0, 0, 0]);
    }

    #[test]
    fn requested_background_fills_padding_and_shows_through() {
        let mut source = solid(20, 20, [255, 255, 255, 255]);
        source.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let out = PaddedComposite::requested(0.5)
            .transform(&source, SizePx::new(60, 130), &RenderContext::new(Rgb::new(0, 128, 255)))
            .unwrap();
        assert_eq!(out.dimensions(), (60, 130));
        assert_eq!(out.get_pixel(0, 0).0, [0, 128, 255, 255]);
        assert_eq!(out.get_pixel(59, 129).0, [0, 128, 255, 255]);
        // 30px box at (15, 50), composited over an opaque background
        assert_eq!(out.get_pixel(15, 50).0[3], 255);
        assert_eq!(out.get_pixel(30, 65).0, [255, 255, 255, 255]);
    }
}
