//! Source image admission and decoding.
//!
//! Every request goes through [`UploadPolicy::admit`] before any pixels are
//! decoded, which bounds the memory and CPU a single upload can consume.
//! The admitted bytes are then decoded once into a [`SourceImage`] that all
//! renders read from.

pub mod svg;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{DecodeError, ValidationError};

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// ============================================================================
// SourceMime
// ============================================================================

/// The allow-listed MIME types an upload may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMime {
    Png,
    /// Both `image/jpeg` and the non-standard `image/jpg`.
    Jpeg,
    Svg,
}

impl SourceMime {
    /// Parses a declared MIME type, rejecting anything off the allow-list.
    pub fn parse(mime: &str) -> Result<Self, ValidationError> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(Self::Png),
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/svg+xml" => Ok(Self::Svg),
            _ => Err(ValidationError::UnsupportedMime(mime.to_string())),
        }
    }

    /// Guesses the MIME type from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
        }
    }
}

// ============================================================================
// UploadPolicy
// ============================================================================

/// Admission gate applied to raw uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Largest accepted upload, in bytes.
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Checks the declared MIME type and the upload size.
    pub fn admit(&self, bytes: &[u8], mime: &str) -> Result<SourceMime, ValidationError> {
        let mime = SourceMime::parse(mime)
            .inspect_err(|err| log::warn!("rejected upload: {err}"))?;
        if bytes.len() > self.max_bytes {
            let err = ValidationError::TooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            };
            log::warn!("rejected {} upload: {err}", mime.as_str());
            return Err(err);
        }
        log::debug!("admitted {} upload of {} bytes", mime.as_str(), bytes.len());
        Ok(mime)
    }
}

// ============================================================================
// SourceImage
// ============================================================================

/// Container format the source was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Png,
    Jpeg,
    Svg,
}

/// A decoded upload. Immutable for the lifetime of a request.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
    channel_count: u8,
    format: SourceFormat,
}

impl SourceImage {
    /// Decodes admitted bytes.
    ///
    /// Raster formats are sniffed from the content rather than trusted from
    /// the declared MIME type, and only PNG and JPEG content is decoded.
    /// SVG is parsed as SVG.
    pub fn decode(bytes: &[u8], mime: SourceMime) -> Result<Self, DecodeError> {
        let source = match mime {
            SourceMime::Svg => Self {
                pixels: svg::rasterize(bytes, svg::SVG_RASTER_SIZE)?,
                channel_count: 4,
                format: SourceFormat::Svg,
            },
            SourceMime::Png | SourceMime::Jpeg => {
                let found = image::guess_format(bytes)?;
                let format = match found {
                    ImageFormat::Png => SourceFormat::Png,
                    ImageFormat::Jpeg => SourceFormat::Jpeg,
                    _ => {
                        return Err(DecodeError::UnsupportedFormat {
                            declared: mime.as_str(),
                            found,
                        });
                    }
                };
                let decoded = image::load_from_memory_with_format(bytes, found)?;
                Self::from_dynamic(decoded, format)
            }
        };
        log::debug!(
            "decoded {:?} source {}x{} with {} channels",
            source.format,
            source.width(),
            source.height(),
            source.channel_count
        );
        Ok(source)
    }

    /// Wraps an already decoded image.
    pub fn from_dynamic(image: DynamicImage, format: SourceFormat) -> Self {
        let channel_count = image.color().channel_count();
        Self {
            pixels: image.into_rgba8(),
            channel_count,
            format,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Number of channels in the decoded container (1-4).
    pub fn channel_count(&self) -> u8 {
        self.channel_count
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// The pixels, normalized to RGBA.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether the source may carry transparency.
    ///
    /// This trusts the container (four channels, or any PNG) instead of
    /// scanning alpha values, so an opaque PNG still reports true.
    pub fn has_transparency(&self) -> bool {
        self.channel_count == 4 || self.format == SourceFormat::Png
    }
}
