//! Browser bindings for rendermime.
//!
//! The bindings render to HTML strings; inserting the markup (and running
//! its scripts) is left to the JavaScript host.

use rendermime_renderers::{MimeBundle, RenderMime, RenderMimeConfig, default_rendermime};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

/// Result of rendering a MIME bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedOutput {
    /// The MIME type that was chosen.
    pub mimetype: String,
    /// Inner HTML of the rendered container.
    pub html: String,
}

fn parse_config(config: JsValue) -> Result<RenderMimeConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(RenderMimeConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))
}

/// Supported MIME types, most preferred first.
#[wasm_bindgen]
pub fn mimetypes() -> js_sys::Array {
    default_rendermime()
        .mimetypes()
        .into_iter()
        .map(|m| JsValue::from_str(&m))
        .collect()
}

/// Renders one payload and returns the container's inner HTML.
#[wasm_bindgen]
pub fn render(mimetype: &str, data: &str) -> Result<String, JsError> {
    let widget = default_rendermime()
        .render(mimetype, data)
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(widget.into_node().inner_html())
}

/// Renders the preferred entry of a notebook MIME bundle.
///
/// Returns `{ mimetype, html }`, or `undefined` when no entry is supported.
#[wasm_bindgen(js_name = renderBundle)]
pub fn render_bundle(bundle: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let rendermime = RenderMime::from_config(parse_config(config)?);
    let value: serde_json::Value = serde_wasm_bindgen::from_value(bundle)
        .map_err(|e| JsError::new(&format!("Invalid bundle: {}", e)))?;
    let bundle = MimeBundle::from_json(&value).map_err(|e| JsError::new(&e.to_string()))?;

    let Some((mimetype, widget)) = rendermime
        .render_bundle(&bundle)
        .map_err(|e| JsError::new(&e.to_string()))?
    else {
        return Ok(JsValue::UNDEFINED);
    };

    let output = RenderedOutput {
        mimetype,
        html: widget.into_node().inner_html(),
    };
    serde_wasm_bindgen::to_value(&output)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
