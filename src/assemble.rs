//! Packaging rendered buffers for transport.
//!
//! [`RenderedIcon`] holds the raw PNG inside the process. [`GeneratedIcon`]
//! is the outward shape: the PNG travels as a base64 data URL and the raw
//! buffer is left behind.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::registry::{IconCategory, IconSpec};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A rendered PNG still attached to its spec.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedIcon {
    spec: &'static IconSpec,
    png: Vec<u8>,
}

impl RenderedIcon {
    pub fn new(spec: &'static IconSpec, png: Vec<u8>) -> Self {
        Self { spec, png }
    }

    pub fn spec(&self) -> &'static IconSpec {
        self.spec
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// The encoded PNG bytes.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Converts to the outward form, dropping the raw buffer.
    pub fn into_generated(self) -> GeneratedIcon {
        GeneratedIcon {
            name: self.spec.name.to_string(),
            size: self.spec.size_description(),
            url: to_data_url(&self.png),
            category: self.spec.category,
        }
    }
}

/// One generated asset as handed to callers.
///
/// # JSON Format
///
/// ```json
/// {
///   "name": "icon",
///   "size": "1024×1024px (App icon)",
///   "url": "data:image/png;base64,iVBORw0KGgo...",
///   "category": "icon"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub struct GeneratedIcon {
    pub name: String,

    /// Pixel dimensions plus a human description.
    pub size: String,

    /// `data:image/png;base64,...`
    pub url: String,

    pub category: IconCategory,
}

impl GeneratedIcon {
    /// Decodes the PNG carried in [`url`](Self::url).
    pub fn png_bytes(&self) -> Option<Vec<u8>> {
        from_data_url(&self.url)
    }
}

/// Converts rendered icons to their outward form, preserving order.
pub fn assemble(rendered: Vec<RenderedIcon>) -> Vec<GeneratedIcon> {
    rendered.into_iter().map(RenderedIcon::into_generated).collect()
}

pub fn to_data_url(png: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png))
}

/// Extracts the bytes from a PNG data URL. Returns `None` for anything else.
pub fn from_data_url(url: &str) -> Option<Vec<u8>> {
    let payload = url.strip_prefix(PNG_DATA_URL_PREFIX)?;
    STANDARD.decode(payload).ok()
}
