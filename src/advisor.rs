//! Background color recommendation.
//!
//! The advisor is a pure function of [`ColorSamples`]. For transparent
//! artwork it prefers the color the edges were drawn against, provided that
//! color stands apart from the artwork itself; otherwise it derives a
//! complementary color from the dominant one.

use serde::{Deserialize, Serialize};

use crate::color::{self, Rgb};
use crate::sampler::ColorSamples;

/// Minimum edge/dominant contrast ratio for the edge color to be suggested.
pub const EDGE_CONTRAST_THRESHOLD: f32 = 1.5;

// ============================================================================
// Reasoning
// ============================================================================

/// Why a background color was suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub enum Reasoning {
    /// The most common edge color, which contrasts with the artwork.
    #[serde(rename = "edges")]
    Edges,

    /// Edges exist but blend into the artwork.
    #[serde(rename = "complementary (low edge contrast)")]
    ComplementaryLowContrast,

    /// Opaque image, or no visible edges to learn from.
    #[serde(rename = "complementary (no transparency)")]
    ComplementaryNoTransparency,

    /// Analysis failed; the suggestion is a safe default.
    #[serde(rename = "error fallback")]
    ErrorFallback,
}

impl Reasoning {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edges => "edges",
            Self::ComplementaryLowContrast => "complementary (low edge contrast)",
            Self::ComplementaryNoTransparency => "complementary (no transparency)",
            Self::ErrorFallback => "error fallback",
        }
    }
}

impl std::fmt::Display for Reasoning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ColorAnalysisResult
// ============================================================================

/// The outward result of color analysis.
///
/// # JSON Format
///
/// ```json
/// {
///   "suggestedBackgroundColor": "#0000ff",
///   "dominantColors": ["#ff0000", "#0000ff"],
///   "hasTransparency": true,
///   "edgeColors": ["#0000ff"],
///   "reasoning": "edges"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub struct ColorAnalysisResult {
    /// `#rrggbb`
    pub suggested_background_color: String,

    /// Dominant color first, then edge colors; deduplicated.
    pub dominant_colors: Vec<String>,

    pub has_transparency: bool,

    /// Deduplicated edge band colors, in discovery order.
    pub edge_colors: Vec<String>,

    pub reasoning: Reasoning,
}

impl ColorAnalysisResult {
    /// The safe default returned when analysis fails.
    pub fn fallback() -> Self {
        let white = color::to_hex(color::WHITE);
        Self {
            suggested_background_color: white.clone(),
            dominant_colors: vec![white],
            has_transparency: false,
            edge_colors: Vec::new(),
            reasoning: Reasoning::ErrorFallback,
        }
    }

    /// Serializes the result to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the result to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// BackgroundAdvisor
// ============================================================================

/// A suggested background color with its justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub color: Rgb,
    pub reasoning: Reasoning,
}

/// Decides a background color from sampled image colors.
#[derive(Debug, Default, Clone, Copy)]
pub struct BackgroundAdvisor;

impl BackgroundAdvisor {
    pub fn new() -> Self {
        Self
    }

    pub fn suggest(&self, samples: &ColorSamples) -> Suggestion {
        let dominant = samples.dominant.color;
        let edge_mode = mode(samples.edges.iter().map(|s| s.color));

        match edge_mode {
            Some(edge) if samples.has_transparency => {
                let contrast = color::contrast_ratio(edge, dominant);
                log::debug!(
                    "edge {} vs dominant {}: contrast {contrast:.3}",
                    color::to_hex(edge),
                    color::to_hex(dominant)
                );
                if contrast > EDGE_CONTRAST_THRESHOLD {
                    Suggestion {
                        color: edge,
                        reasoning: Reasoning::Edges,
                    }
                } else {
                    Suggestion {
                        color: color::complementary(dominant),
                        reasoning: Reasoning::ComplementaryLowContrast,
                    }
                }
            }
            _ => Suggestion {
                color: color::complementary(dominant),
                reasoning: Reasoning::ComplementaryNoTransparency,
            },
        }
    }

    /// Runs the advisor and packages the outward result.
    pub fn analyze(&self, samples: &ColorSamples) -> ColorAnalysisResult {
        let suggestion = self.suggest(samples);
        ColorAnalysisResult {
            suggested_background_color: color::to_hex(suggestion.color),
            dominant_colors: samples.unique_colors().into_iter().map(color::to_hex).collect(),
            has_transparency: samples.has_transparency,
            edge_colors: samples
                .unique_edge_colors()
                .into_iter()
                .map(color::to_hex)
                .collect(),
            reasoning: suggestion.reasoning,
        }
    }
}

/// Most frequent color; ties go to the one seen first.
fn mode(colors: impl Iterator<Item = Rgb>) -> Option<Rgb> {
    let mut tally: Vec<(Rgb, usize)> = Vec::new();
    for color in colors {
        match tally.iter_mut().find(|(c, _)| *c == color) {
            Some((_, n)) => *n += 1,
            None => tally.push((color, 1)),
        }
    }

    let mut best: Option<(Rgb, usize)> = None;
    for (color, n) in tally {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((color, n));
        }
    }
    best.map(|(color, _)| color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{ColorSample, EdgeRegion};

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn samples(dominant: Rgb, edges: &[Rgb], has_transparency: bool) -> ColorSamples {
        let regions = [EdgeRegion::Top, EdgeRegion::Bottom, EdgeRegion::Left, EdgeRegion::Right];
        ColorSamples {
            dominant: ColorSample {
                color: dominant,
                region: EdgeRegion::Global,
            },
            edges: edges
                .iter()
                .zip(regions)
                .map(|(&color, region)| ColorSample { color, region })
                .collect(),
            has_transparency,
        }
    }

    #[test]
    fn contrasting_edges_win() {
        let s = BackgroundAdvisor::new().suggest(&samples(RED, &[BLUE; 4], true));
        assert_eq!(s.color, BLUE);
        assert_eq!(s.reasoning, Reasoning::Edges);
    }

    #[test]
    fn low_contrast_edges_fall_back_to_complementary() {
        let near_red = Rgb::new(250, 5, 5);
        let s = BackgroundAdvisor::new().suggest(&samples(RED, &[near_red; 4], true));
        assert_eq!(s.reasoning, Reasoning::ComplementaryLowContrast);
        assert_eq!(s.color, color::complementary(RED));
    }

    #[test]
    fn opaque_images_use_complementary() {
        let s = BackgroundAdvisor::new().suggest(&samples(RED, &[BLUE; 4], false));
        assert_eq!(s.reasoning, Reasoning::ComplementaryNoTransparency);
        assert_eq!(s.color, color::complementary(RED));
    }

    #[test]
    fn transparent_without_edges_uses_complementary() {
        let s = BackgroundAdvisor::new().suggest(&samples(RED, &[], true));
        assert_eq!(s.reasoning, Reasoning::ComplementaryNoTransparency);
    }

    #[test]
    fn edge_mode_breaks_ties_by_first_occurrence() {
        let green = Rgb::new(0, 255, 0);
        assert_eq!(mode([BLUE, green, green, BLUE].into_iter()), Some(BLUE));
        assert_eq!(mode([BLUE, green, green, RED].into_iter()), Some(green));
        assert_eq!(mode(std::iter::empty()), None);
    }

    #[test]
    fn analyze_produces_hex_fields() {
        let result = BackgroundAdvisor::new().analyze(&samples(RED, &[BLUE, BLUE, RED, BLUE], true));
        assert_eq!(result.suggested_background_color, "#0000ff");
        assert_eq!(result.dominant_colors, vec!["#ff0000", "#0000ff"]);
        assert_eq!(result.edge_colors, vec!["#0000ff", "#ff0000"]);
        assert!(result.has_transparency);
        assert_eq!(result.reasoning, Reasoning::Edges);
    }

    #[test]
    fn result_json_uses_camel_case_and_reasoning_text() {
        let json = ColorAnalysisResult::fallback().to_json().unwrap();
        assert!(json.contains("\"suggestedBackgroundColor\":\"#ffffff\""));
        assert!(json.contains("\"dominantColors\":[\"#ffffff\"]"));
        assert!(json.contains("\"hasTransparency\":false"));
        assert!(json.contains("\"edgeColors\":[]"));
        assert!(json.contains("\"reasoning\":\"error fallback\""));

        let restored: ColorAnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ColorAnalysisResult::fallback());
    }
}
