//! Statistical color sampling of a source image.
//!
//! The sampler measures the dominant color of the whole image and of the four
//! edge bands. Edge bands hint at the background the artwork was drawn on.

use image::{Rgba, RgbaImage, imageops};

use crate::color::Rgb;
use crate::error::AnalysisError;
use crate::source::SourceImage;

/// Maximum edge band thickness in pixels.
const MAX_BAND_PX: u32 = 20;

/// Bits kept per channel when binning pixels (16 levels, 4096 bins).
const BIN_BITS: u32 = 4;
const BIN_COUNT: usize = 1 << (BIN_BITS * 3);

/// The region a [`ColorSample`] was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRegion {
    Global,
    Top,
    Bottom,
    Left,
    Right,
}

/// A dominant color and where it was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSample {
    pub color: Rgb,
    pub region: EdgeRegion,
}

/// Everything the background advisor needs to know about an image.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSamples {
    /// Dominant color of the whole image.
    pub dominant: ColorSample,

    /// Dominant colors of the edge bands, in top, bottom, left, right order.
    ///
    /// A band with no visible pixels contributes no sample.
    pub edges: Vec<ColorSample>,

    pub has_transparency: bool,
}

impl ColorSamples {
    /// Edge colors deduplicated, in discovery order.
    pub fn unique_edge_colors(&self) -> Vec<Rgb> {
        dedup(self.edges.iter().map(|s| s.color))
    }

    /// Dominant color followed by the edge colors, deduplicated.
    pub fn unique_colors(&self) -> Vec<Rgb> {
        dedup(std::iter::once(self.dominant.color).chain(self.edges.iter().map(|s| s.color)))
    }
}

fn dedup(colors: impl Iterator<Item = Rgb>) -> Vec<Rgb> {
    let mut out: Vec<Rgb> = Vec::new();
    for color in colors {
        if !out.contains(&color) {
            out.push(color);
        }
    }
    out
}

/// Extracts [`ColorSamples`] from decoded images.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorSampler;

impl ColorSampler {
    pub fn new() -> Self {
        Self
    }

    pub fn sample(&self, source: &SourceImage) -> Result<ColorSamples, AnalysisError> {
        let img = source.pixels();
        let dominant = dominant_color(img).ok_or(AnalysisError::NoVisiblePixels)?;

        let edges = edge_bands(img.width(), img.height())
            .into_iter()
            .filter_map(|(region, (x, y, w, h))| {
                let band = imageops::crop_imm(img, x, y, w, h).to_image();
                dominant_color(&band).map(|color| ColorSample { color, region })
            })
            .collect();

        Ok(ColorSamples {
            dominant: ColorSample {
                color: dominant,
                region: EdgeRegion::Global,
            },
            edges,
            has_transparency: source.has_transparency(),
        })
    }
}

/// Edge band thickness: 10% of the shorter side, capped at 20px, at least 1px.
pub fn band_thickness(width: u32, height: u32) -> u32 {
    (width.min(height) / 10).clamp(1, MAX_BAND_PX)
}

/// The four edge rectangles as `(x, y, width, height)`.
fn edge_bands(width: u32, height: u32) -> [(EdgeRegion, (u32, u32, u32, u32)); 4] {
    let band_h = band_thickness(width, height).min(height);
    let band_w = band_thickness(width, height).min(width);
    [
        (EdgeRegion::Top, (0, 0, width, band_h)),
        (EdgeRegion::Bottom, (0, height - band_h, width, band_h)),
        (EdgeRegion::Left, (0, 0, band_w, height)),
        (EdgeRegion::Right, (width - band_w, 0, band_w, height)),
    ]
}

/// The most frequent color of a region.
///
/// Visible pixels (alpha > 0) are binned at 4 bits per channel; the winning
/// bin is the most populated one, ties going to the lowest bin index. The
/// result is the mean of the pixels that fell into that bin, so a flat region
/// reports its exact color. Returns `None` when nothing is visible.
pub fn dominant_color(region: &RgbaImage) -> Option<Rgb> {
    let mut counts = vec![0u32; BIN_COUNT];
    let mut sums = vec![[0u64; 3]; BIN_COUNT];

    for &Rgba([r, g, b, a]) in region.pixels() {
        if a == 0 {
            continue;
        }
        let shift = 8 - BIN_BITS;
        let bin = ((r as usize >> shift) << (BIN_BITS * 2))
            | ((g as usize >> shift) << BIN_BITS)
            | (b as usize >> shift);
        counts[bin] += 1;
        sums[bin][0] += r as u64;
        sums[bin][1] += g as u64;
        sums[bin][2] += b as u64;
    }

    let mut best = 0;
    for (bin, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = bin;
        }
    }

    let n = counts[best] as u64;
    if n == 0 {
        return None;
    }
    let [r, g, b] = sums[best];
    Some(Rgb::new(
        ((r + n / 2) / n) as u8,
        ((g + n / 2) / n) as u8,
        ((b + n / 2) / n) as u8,
    ))
}
