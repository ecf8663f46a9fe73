//! Pandora WASM - WebAssembly bindings for Pandora
//!
//! This crate exposes the pandora-core engine to JavaScript/TypeScript
//! applications working with canvas `ImageData`.
//!
//! # Module Structure
//!
//! - `types` - The `JsPixelBuffer` image wrapper
//! - `operations` - Single adjustments, filters, fills and the fast blur
//! - `presets` - Built-in and JSON-defined presets
//! - `codec` - Decoding and export
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPixelBuffer, apply_preset } from '@pandora/wasm';
//!
//! await init();
//!
//! const data = ctx.getImageData(0, 0, canvas.width, canvas.height);
//! const image = new JsPixelBuffer(data.width, data.height, new Uint8Array(data.data.buffer));
//! const out = apply_preset(image, 'preset01');
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(out.pixels()), out.width, out.height), 0, 0);
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod operations;
mod presets;
mod types;

pub use codec::{decode_image, export_image};
pub use operations::{adjust, blur, fill, filter};
pub use presets::{apply_preset, apply_preset_json, preset_names, preset_steps};
pub use types::JsPixelBuffer;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
