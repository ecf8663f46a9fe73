//! Preset WASM bindings.
//!
//! Presets run all-or-nothing: if any step fails the error is returned and
//! no partial result is produced.

use pandora_core::{NamedPreset, Preset};
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsPixelBuffer};

/// Apply a built-in preset (`preset01` to `preset12`).
#[wasm_bindgen]
pub fn apply_preset(image: &JsPixelBuffer, name: &str) -> Result<JsPixelBuffer, JsValue> {
    let preset: NamedPreset = name.parse().map_err(to_js_error)?;
    let mut buffer = image.to_buffer();
    preset.apply(&mut buffer).map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_buffer(buffer))
}

/// Apply a preset given as a JSON step list.
///
/// # Example (TypeScript)
/// ```typescript
/// const steps = JSON.stringify([
///   { type: 'fill', mode: 'multiply', source: { color: '#f7d9ad' }, opacity: 1 },
///   { type: 'adjust', adjustment: 'contrast', params: [40] },
/// ]);
/// const out = apply_preset_json(image, steps);
/// ```
#[wasm_bindgen]
pub fn apply_preset_json(image: &JsPixelBuffer, json: &str) -> Result<JsPixelBuffer, JsValue> {
    let preset = Preset::from_json(json).map_err(to_js_error)?;
    let mut buffer = image.to_buffer();
    preset.apply(&mut buffer).map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_buffer(buffer))
}

/// Names of the built-in presets.
#[wasm_bindgen]
pub fn preset_names() -> Vec<String> {
    NamedPreset::ALL.iter().map(|p| p.name().to_string()).collect()
}

/// Step list of a built-in preset as a plain JavaScript array.
#[wasm_bindgen]
pub fn preset_steps(name: &str) -> Result<JsValue, JsValue> {
    let preset: NamedPreset = name.parse().map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&preset.preset()).map_err(to_js_error)
}
