//! Pandora Core - Pixel-buffer transformation engine
//!
//! This crate provides the image processing engine behind Pandora: tonal
//! adjustments, convolution filters, a fast sliding-window blur, blend-mode
//! fills and the preset pipeline that sequences them.
//!
//! All operations work on a [`PixelBuffer`] holding 8-bit RGBA data
//! (4 bytes per pixel, row-major order). Every transform preserves the
//! buffer dimensions.

pub mod adjustments;
pub mod blur;
pub mod codec;
pub mod color;
pub mod composite;
pub mod convolve;
pub mod error;
pub mod fill;
pub mod filters;
pub mod luminance;
pub mod pipeline;
pub mod presets;

pub use adjustments::Adjustment;
pub use blur::box_blur;
pub use composite::BlendMode;
pub use convolve::{convolve, Kernel};
pub use error::{PandoraError, PandoraResult};
pub use fill::{Color, Fill, FillSource, Gradient};
pub use filters::Filter;
pub use pipeline::{run, Preset, Step};
pub use presets::NamedPreset;

/// Number of bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// An RGBA pixel buffer (4 bytes per pixel, row-major order).
///
/// Deserialization goes through [`PixelBuffer::new`], so the length check
/// also applies to serialized buffers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawPixelBuffer")]
pub struct PixelBuffer {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// RGBA pixel data, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from existing RGBA data.
    ///
    /// Fails with [`PandoraError::InvalidBuffer`] if the data length is not
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> PandoraResult<Self> {
        let expected = Self::byte_len(width, height);
        if pixels.len() != expected {
            return Err(PandoraError::InvalidBuffer {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Expected byte length for the given dimensions.
    #[inline]
    pub fn byte_len(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * CHANNELS
    }

    /// Number of pixels in the buffer.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Check whether the buffer has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get the RGBA value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * CHANNELS;
        let px = &self.pixels[idx..idx + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Consume the buffer and return the raw RGBA bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Unchecked serialized form of a [`PixelBuffer`].
#[derive(serde::Deserialize)]
struct RawPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TryFrom<RawPixelBuffer> for PixelBuffer {
    type Error = PandoraError;

    fn try_from(raw: RawPixelBuffer) -> Result<Self, Self::Error> {
        PixelBuffer::new(raw.width, raw.height, raw.pixels)
    }
}

/// Convert an intermediate channel value to a byte.
///
/// Values are rounded half away from zero and clamped to `[0, 255]`.
/// NaN maps to 0.
#[inline]
pub fn clamp_channel(value: f64) -> u8 {
    // `as` saturates and maps NaN to 0
    value.round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());

        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            PandoraError::InvalidBuffer {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_deserialize_validates_length() {
        let buf: PixelBuffer =
            serde_json::from_str(r#"{"width":1,"height":1,"pixels":[1,2,3,4]}"#).unwrap();
        assert_eq!(buf.pixel(0, 0), Some([1, 2, 3, 4]));

        let err = serde_json::from_str::<PixelBuffer>(r#"{"width":4,"height":4,"pixels":[1,2,3]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("expected 64"), "{}", err);
    }

    #[test]
    fn test_filled() {
        let buf = PixelBuffer::filled(3, 2, [1, 2, 3, 4]);
        assert_eq!(buf.pixels.len(), 24);
        assert_eq!(buf.pixel_count(), 6);
        assert_eq!(buf.pixel(2, 1), Some([1, 2, 3, 4]));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let buf = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
        assert_eq!(buf.pixel(2, 0), None);
        assert_eq!(buf.pixel(0, 2), None);
    }

    #[test]
    fn test_empty_buffer() {
        let buf = PixelBuffer::new(0, 0, vec![]).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.into_pixels(), Vec::<u8>::new());
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(-10.0), 0);
        assert_eq!(clamp_channel(300.0), 255);
        assert_eq!(clamp_channel(127.5), 128);
        assert_eq!(clamp_channel(127.49), 127);
        assert_eq!(clamp_channel(f64::NAN), 0);
    }
}
