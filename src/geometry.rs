//! Pixel geometry shared by the transform strategies.
//!
//! All arithmetic here is integer-exact: fractional extents are floored and
//! odd remainders are split floor/ceil, so a given input always maps to the
//! same pixel boxes.

/// A rectangle defined in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: u32,
    /// Y offset from the top edge of the image
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RectPx {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The sub-rectangle anchored at the top-right corner of `source` whose
    /// extents are `floor(source * fraction)` on each axis.
    pub fn top_right(source: SizePx, width_fraction: f64, height_fraction: f64) -> Self {
        let width = floor_scale(source.width, width_fraction).min(source.width);
        let height = floor_scale(source.height, height_fraction).min(source.height);
        Self::new(source.width - width, 0, width, height)
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// The largest size with this aspect ratio that fits inside `bounds`.
    ///
    /// Each side is at least one pixel and never exceeds the bound.
    pub fn fit_within(&self, bounds: SizePx) -> SizePx {
        let sx = bounds.width as f64 / self.width.max(1) as f64;
        let sy = bounds.height as f64 / self.height.max(1) as f64;
        let scale = sx.min(sy);
        let fit = |side: u32, bound: u32| ((side as f64 * scale).round() as u32).clamp(1, bound.max(1));
        SizePx::new(fit(self.width, bounds.width), fit(self.height, bounds.height))
    }

    /// Top-left offset that centers `inner` in this size.
    ///
    /// Odd remainders put the extra pixel after the content (floor before,
    /// ceil after), independently per axis.
    pub fn center_offset(&self, inner: SizePx) -> (u32, u32) {
        (
            self.width.saturating_sub(inner.width) / 2,
            self.height.saturating_sub(inner.height) / 2,
        )
    }
}

/// `floor(value * factor)`, tolerant of products that land a hair under an
/// integer because `factor` has no exact binary representation.
pub fn floor_scale(value: u32, factor: f64) -> u32 {
    (value as f64 * factor + 1e-9).floor().max(0.0) as u32
}
