//! Error types for admission, decoding, analysis and rendering.
//!
//! Rendering is all-or-nothing: the first failing spec aborts the batch and
//! the error names it. Color analysis never surfaces its errors; see
//! [`AnalysisError`].

use thiserror::Error;

/// Rejections raised by the admission gate, before any decode work.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("unsupported file type `{0}`; upload a PNG, JPEG or SVG image")]
    UnsupportedMime(String),

    #[error("file is {size} bytes, which exceeds the {limit} byte upload limit")]
    TooLarge { size: usize, limit: usize },

    #[error("`{0}` is not a valid hex color (expected #RRGGBB)")]
    InvalidColor(String),
}

/// The uploaded bytes could not be turned into pixels.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("svg parse failed: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("svg cannot be rasterized at {width}x{height}")]
    SvgRaster { width: u32, height: u32 },

    #[error("upload declared as {declared} contains {found:?} data")]
    UnsupportedFormat {
        declared: &'static str,
        found: image::ImageFormat,
    },
}

/// A single spec failed to render.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("region {width}x{height} is empty")]
    EmptyRegion { width: u32, height: u32 },

    #[error("png encode failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Internal failures of the color sampler.
///
/// These never leave the crate: the pipeline logs them and answers with
/// [`ColorAnalysisResult::fallback`](crate::ColorAnalysisResult::fallback).
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("image has no visible pixels")]
    NoVisiblePixels,
}

/// Failure of a whole icon generation request.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to decode source image: {0}")]
    Decode(#[from] DecodeError),

    #[error("failed to process {spec}: {source}")]
    Render {
        spec: &'static str,
        #[source]
        source: RenderError,
    },
}

impl GenerateError {
    /// Returns true when the caller sent something we refuse to process
    /// (the 4xx class), as opposed to a failure while processing it.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The categorized message safe to show to a client.
    ///
    /// Validation errors keep their specific text. Decode and render errors
    /// drop the underlying cause, which is only logged server-side.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Decode(_) => "Failed to read the uploaded image".to_string(),
            Self::Render { spec, .. } => format!("Failed to process {spec}"),
        }
    }

    /// Name of the spec whose render aborted the batch, if any.
    pub fn failed_spec(&self) -> Option<&'static str> {
        match self {
            Self::Render { spec, .. } => Some(spec),
            _ => None,
        }
    }
}
