//! Image decode and export WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, export_image } from '@pandora/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//!
//! // Defaults: jpeg at quality 0.75
//! const jpeg = export_image(image);
//! const png = export_image(image, 'png');
//! ```

use pandora_core::codec::{self, ExportConfig, ExportFormat};
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsPixelBuffer};

/// Decode an encoded image (JPEG, PNG) to RGBA.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    codec::decode(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}

/// Encode an image.
///
/// # Arguments
/// * `image` - Image to encode
/// * `format` - `jpeg` (default) or `png`
/// * `quality` - Encoder quality from 0 to 1 (default 0.75, JPEG only)
#[wasm_bindgen]
pub fn export_image(
    image: &JsPixelBuffer,
    format: Option<String>,
    quality: Option<f64>,
) -> Result<Vec<u8>, JsValue> {
    let config = export_config(format.as_deref(), quality).map_err(to_js_error)?;
    codec::export(image.buffer(), &config).map_err(to_js_error)
}

fn export_config(format: Option<&str>, quality: Option<f64>) -> Result<ExportConfig, String> {
    let defaults = ExportConfig::default();
    let format = match format {
        None => defaults.format,
        Some("jpeg") | Some("jpg") => ExportFormat::Jpeg,
        Some("png") => ExportFormat::Png,
        Some(other) => return Err(format!("Unsupported export format: {}", other)),
    };
    Ok(ExportConfig {
        format,
        quality: quality.unwrap_or(defaults.quality),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandora_core::PixelBuffer;

    #[test]
    fn test_export_config_defaults() {
        assert_eq!(export_config(None, None).unwrap(), ExportConfig::default());
        let config = export_config(Some("png"), Some(0.3)).unwrap();
        assert_eq!(config.format, ExportFormat::Png);
        assert_eq!(config.quality, 0.3);
        assert!(export_config(Some("gif"), None).is_err());
    }

    #[test]
    fn test_png_export_and_decode() {
        let src = PixelBuffer::new(2, 1, vec![1, 2, 3, 4, 250, 251, 252, 253]).unwrap();
        let image = JsPixelBuffer::from_buffer(src.clone());
        let bytes = export_image(&image, Some("png".to_string()), None).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.pixels(), src.pixels);
    }

    #[test]
    fn test_default_export_is_jpeg() {
        let image = JsPixelBuffer::from_buffer(PixelBuffer::filled(8, 8, [50, 60, 70, 255]));
        let bytes = export_image(&image, None, None).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }
}
