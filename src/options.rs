//! Serializable render options sent alongside an upload.
//!
//! # Example
//!
//! ```
//! use iconset_renderer::RenderOptions;
//!
//! let options = RenderOptions::new()
//!     .with_background_color("#1e90ff")
//!     .with_splash(true);
//!
//! let json = options.to_json().unwrap();
//! assert_eq!(json, r##"{"backgroundColor":"#1e90ff","includeSplash":true}"##);
//!
//! let restored = RenderOptions::from_json(&json).unwrap();
//! assert_eq!(restored, options);
//! ```

use serde::{Deserialize, Serialize};

use crate::color::{self, Rgb};
use crate::error::ValidationError;

/// Per-request rendering options.
///
/// # JSON Format
///
/// ```json
/// {
///   "backgroundColor": "#ffffff",
///   "includeSplash": false
/// }
/// ```
///
/// Both fields are optional on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub struct RenderOptions {
    /// `#RRGGBB`. Fills the splash screen around the padded source.
    #[serde(default = "default_background_color")]
    pub background_color: String,

    /// Whether the full splash screen is rendered.
    #[serde(default)]
    pub include_splash: bool,
}

fn default_background_color() -> String {
    color::to_hex(color::WHITE)
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            include_splash: false,
        }
    }
}

impl RenderOptions {
    /// White background, no splash.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background_color(mut self, hex: impl Into<String>) -> Self {
        self.background_color = hex.into();
        self
    }

    pub fn with_background(self, color: Rgb) -> Self {
        self.with_background_color(color::to_hex(color))
    }

    pub fn with_splash(mut self, include_splash: bool) -> Self {
        self.include_splash = include_splash;
        self
    }

    /// Parses [`background_color`](Self::background_color).
    pub fn background(&self) -> Result<Rgb, ValidationError> {
        color::parse_hex(&self.background_color)
            .inspect_err(|err| log::warn!("rejected render options: {err}"))
    }

    /// Serializes the options to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the options to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
