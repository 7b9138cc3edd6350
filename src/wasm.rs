//! WASM bindings for browser-based note annotation.
//!
//! This module exposes the annotate and export pipeline to JavaScript via
//! wasm-bindgen. Separator overrides are passed as a JSON string (an empty
//! string means defaults).

use wasm_bindgen::prelude::*;

use crate::{SeparatorConfig, SeparatorOverrides};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn parse_config(config_json: &str) -> Result<SeparatorConfig, JsValue> {
    if config_json.trim().is_empty() {
        return Ok(SeparatorConfig::default());
    }
    let overrides =
        SeparatorOverrides::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(SeparatorConfig::from_overrides(overrides))
}

/// Annotate outline text.
///
/// Returns the annotated tree as JSON (`content`, `inlineNote`,
/// `detailedNote`, `hasNote`, `children`).
#[wasm_bindgen]
pub fn annotate_outline(text: &str, config_json: &str) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    let tree = crate::annotate(text, &config);
    serde_json::to_string(&tree).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rewrite outline text in canonical form.
#[wasm_bindgen]
pub fn normalize_outline(text: &str, config_json: &str) -> Result<String, JsValue> {
    let config = parse_config(config_json)?;
    Ok(crate::normalize(text, &config))
}
