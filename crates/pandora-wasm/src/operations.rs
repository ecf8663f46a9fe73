//! Single-operation WASM bindings.
//!
//! Each binding copies the input image, runs one operation on the copy and
//! returns it as a new image. The input is never modified.
//!
//! # Example
//!
//! ```typescript
//! import { adjust, filter, fill, blur } from '@pandora/wasm';
//!
//! let out = adjust(image, 'brightness', new Float64Array([20]));
//! out = filter(out, 'sepia', new Float64Array([0.8]));
//! out = fill(out, 'soft-light', 'gradient', 'pannacotta', 1);
//! out = blur(out, 10, 2);
//! ```

use pandora_core::{box_blur, Adjustment, Fill, Filter, PandoraResult, PixelBuffer};
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsPixelBuffer};

fn run_on_copy(
    image: &JsPixelBuffer,
    op: impl FnOnce(&mut PixelBuffer) -> PandoraResult<()>,
) -> Result<JsPixelBuffer, JsValue> {
    let mut buffer = image.to_buffer();
    op(&mut buffer).map_err(to_js_error)?;
    Ok(JsPixelBuffer::from_buffer(buffer))
}

/// Apply a named adjustment.
///
/// # Arguments
/// * `image` - Source image
/// * `name` - Adjustment name (`brightness`, `colorBalance`, ...)
/// * `params` - Positional parameters
#[wasm_bindgen]
pub fn adjust(image: &JsPixelBuffer, name: &str, params: &[f64]) -> Result<JsPixelBuffer, JsValue> {
    let adjustment: Adjustment = name.parse().map_err(to_js_error)?;
    run_on_copy(image, |buf| adjustment.apply(buf, params))
}

/// Apply a named filter.
///
/// `noise` without an explicit seed draws a fresh one, so repeated calls
/// differ. Pass a seed as the third parameter for repeatable output.
#[wasm_bindgen]
pub fn filter(image: &JsPixelBuffer, name: &str, params: &[f64]) -> Result<JsPixelBuffer, JsValue> {
    let filter: Filter = name.parse().map_err(to_js_error)?;
    if filter == Filter::Noise {
        let params = with_noise_seed(params, fresh_seed);
        return run_on_copy(image, |buf| filter.apply(buf, &params));
    }
    run_on_copy(image, |buf| filter.apply(buf, params))
}

/// Composite a solid color or named gradient over the image.
///
/// # Arguments
/// * `mode` - Canvas blend mode name (`multiply`, `soft-light`, ...)
/// * `source_kind` - `color` or `gradient`
/// * `value` - Hex color or gradient name
/// * `opacity` - Fill opacity (0 to 1)
#[wasm_bindgen]
pub fn fill(
    image: &JsPixelBuffer,
    mode: &str,
    source_kind: &str,
    value: &str,
    opacity: f64,
) -> Result<JsPixelBuffer, JsValue> {
    let fill = Fill::from_parts(mode, source_kind, value, opacity).map_err(to_js_error)?;
    let mut buffer = image.to_buffer();
    fill.apply(&mut buffer);
    Ok(JsPixelBuffer::from_buffer(buffer))
}

/// Fast sliding-window blur.
///
/// Radius below 1 returns an unchanged copy. Iterations are clamped to 1-3.
#[wasm_bindgen]
pub fn blur(image: &JsPixelBuffer, radius: f64, iterations: f64) -> JsPixelBuffer {
    let mut buffer = image.to_buffer();
    box_blur(&mut buffer, radius, iterations);
    JsPixelBuffer::from_buffer(buffer)
}

/// Fill in a seed for `noise` params when the caller left it out.
///
/// `seed` is only called when one is needed.
fn with_noise_seed(params: &[f64], seed: impl FnOnce() -> u64) -> Vec<f64> {
    let mut params = params.to_vec();
    if !params.is_empty() && params.len() < 3 {
        params.resize(2, 0.0);
        params.push(seed() as f64);
    }
    params
}

#[cfg(target_arch = "wasm32")]
fn fresh_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn fresh_seed() -> u64 {
    pandora_core::filters::DEFAULT_NOISE_SEED
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(PixelBuffer::filled(4, 4, [10, 20, 30, 255]))
    }

    #[test]
    fn test_adjust_returns_new_image() {
        let src = image();
        let out = adjust(&src, "brightness", &[20.0]).unwrap();
        assert_eq!(&out.pixels()[..4], &[30, 40, 50, 255]);
        assert_eq!(&src.pixels()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_filter_invert() {
        let out = filter(&image(), "invert", &[]).unwrap();
        assert_eq!(&out.pixels()[..4], &[245, 235, 225, 255]);
    }

    #[test]
    fn test_fill_gradient() {
        let out = fill(&image(), "source-over", "gradient", "whiteToBlack", 1.0).unwrap();
        // First column sits at t = 1/8
        assert_eq!(&out.pixels()[..4], &[223, 223, 223, 255]);
    }

    #[test]
    fn test_blur_uniform_image() {
        let out = blur(&image(), 3.0, 2.0);
        assert_eq!(out.pixels(), image().pixels());
    }

    #[test]
    fn test_noise_seed_padding() {
        assert_eq!(with_noise_seed(&[30.0], || 7), vec![30.0, 0.0, 7.0]);
        assert_eq!(with_noise_seed(&[30.0, 1.0], || 7), vec![30.0, 1.0, 7.0]);
        assert!(with_noise_seed(&[], || 7).is_empty());
    }

    #[test]
    fn test_noise_seed_drawn_only_when_missing() {
        let mut draws = 0;
        let params = with_noise_seed(&[30.0, 1.0, 3.0], || {
            draws += 1;
            7
        });
        assert_eq!(params, vec![30.0, 1.0, 3.0]);
        assert_eq!(draws, 0);
    }

    #[test]
    fn test_explicit_noise_seed_is_repeatable() {
        let a = filter(&image(), "noise", &[25.0, 0.0, 11.0]).unwrap();
        let b = filter(&image(), "noise", &[25.0, 0.0, 11.0]).unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }
}
