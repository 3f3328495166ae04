//! wasm-bindgen entry points for browser and edge runtimes.
//!
//! Only available with the `tsify` feature. Results cross the boundary as
//! plain JS objects shaped like the TypeScript declarations `tsify` emits for
//! [`ColorAnalysisResult`] and [`GeneratedIcon`].
//!
//! # Example (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { analyzeColors, generateIcons } from 'iconset-renderer';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const analysis = analyzeColors(bytes, file.type);
//!
//! const icons = generateIcons(bytes, file.type, {
//!   backgroundColor: analysis.suggestedBackgroundColor,
//!   includeSplash: true,
//! });
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::advisor::ColorAnalysisResult;
use crate::assemble::GeneratedIcon;
use crate::options::RenderOptions;
use crate::pipeline::IconPipeline;
use crate::registry::{IconCategory, IconRegistry};

/// Suggests a background color for an upload.
#[wasm_bindgen(js_name = "analyzeColors")]
pub fn analyze_colors(bytes: &[u8], mime: &str) -> Result<JsValue, JsError> {
    let result: ColorAnalysisResult = IconPipeline::new()
        .analyze(bytes, mime)
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&result)
}

/// Renders the icon set. `options` may be `undefined` for the defaults.
#[wasm_bindgen(js_name = "generateIcons")]
pub fn generate_icons(bytes: &[u8], mime: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = if options.is_undefined() || options.is_null() {
        RenderOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid render options: {}", e)))?
    };

    let icons: Vec<GeneratedIcon> = IconPipeline::new()
        .generate(bytes, mime, &options)
        .map_err(|e| JsError::new(&e.public_message()))?;
    to_js(&icons)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpecSummary {
    name: &'static str,
    width: u32,
    height: u32,
    category: IconCategory,
    splash_only: bool,
}

/// Lists the built-in catalog.
#[wasm_bindgen(js_name = "iconSpecs")]
pub fn icon_specs() -> Result<JsValue, JsError> {
    let specs: Vec<SpecSummary> = IconRegistry::standard()
        .iter()
        .map(|spec| SpecSummary {
            name: spec.name,
            width: spec.width,
            height: spec.height,
            category: spec.category,
            splash_only: !spec.inclusion.admits(false),
        })
        .collect();
    to_js(&specs)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Failed to serialize result: {}", e)))
}
