//! iconset-renderer: turn one uploaded image into a full app icon set
//!
//! This crate decodes a PNG, JPEG or SVG upload, suggests a background color
//! that sets it off, and renders the fixed catalog of app icons, favicons,
//! logos and splash screens at their exact pixel sizes.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//!
//! use image::{ImageFormat, Rgba, RgbaImage};
//! use iconset_renderer::{RenderOptions, analyze_colors, generate_icons};
//!
//! let source = RgbaImage::from_pixel(24, 24, Rgba([20, 20, 20, 255]));
//! let mut png = Vec::new();
//! source.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();
//!
//! // Suggest a background, then use it for the splash screen
//! let analysis = analyze_colors(&png, "image/png").unwrap();
//! let options = RenderOptions::new()
//!     .with_background_color(analysis.suggested_background_color)
//!     .with_splash(true);
//!
//! let icons = generate_icons(&png, "image/png", &options).unwrap();
//! let names: Vec<_> = icons.iter().map(|icon| icon.name.as_str()).collect();
//! assert!(names.contains(&"splash"));
//! assert!(names.contains(&"favicon"));
//! ```
//!
//! # Failure Policy
//!
//! Color analysis is best effort: past the upload checks it never fails and
//! answers with [`ColorAnalysisResult::fallback`] instead. Icon generation is
//! all-or-nothing and reports the spec that failed.

pub mod advisor;
pub mod assemble;
pub mod color;
pub mod error;
pub mod geometry;
pub mod options;
pub mod pipeline;
pub mod registry;
pub mod render;
pub mod sampler;
pub mod source;

#[cfg(feature = "tsify")]
mod wasm;

pub use advisor::{BackgroundAdvisor, ColorAnalysisResult, Reasoning, Suggestion};
pub use assemble::{GeneratedIcon, RenderedIcon};
pub use color::Rgb;
pub use error::{AnalysisError, DecodeError, GenerateError, RenderError, ValidationError};
pub use geometry::{RectPx, SizePx};
pub use options::RenderOptions;
pub use pipeline::IconPipeline;
pub use registry::{ICON_SPECS, IconCategory, IconRegistry, IconSpec, Inclusion};
pub use render::{
    Background, CroppedRegion, IconRenderer, PaddedComposite, RenderContext, StandardFit,
    Strategy, Transform,
};
pub use sampler::{ColorSample, ColorSampler, ColorSamples, EdgeRegion};
pub use source::{SourceFormat, SourceImage, SourceMime, UploadPolicy};

/// Analyzes an upload with the default [`IconPipeline`].
pub fn analyze_colors(bytes: &[u8], mime: &str) -> Result<ColorAnalysisResult, ValidationError> {
    IconPipeline::new().analyze(bytes, mime)
}

/// Generates the icon set with the default [`IconPipeline`].
pub fn generate_icons(
    bytes: &[u8],
    mime: &str,
    options: &RenderOptions,
) -> Result<Vec<GeneratedIcon>, GenerateError> {
    IconPipeline::new().generate(bytes, mime, options)
}
