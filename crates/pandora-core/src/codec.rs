//! Decoding into and exporting from [`PixelBuffer`].
//!
//! This is the boundary to encoded image files. Decoding accepts any format
//! the `image` crate can guess from the bytes and always yields RGBA8.
//! Export writes JPEG (alpha dropped) or PNG.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{PixelBuffer, CHANNELS};

/// Errors that can occur while decoding or exporting.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a recognized image format.
    #[error("Invalid or unsupported image format: {0}")]
    InvalidFormat(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Encoding failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Jpeg,
    Png,
}

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    /// Encoder quality from 0.0 to 1.0 (JPEG only)
    pub quality: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jpeg,
            quality: 0.75,
        }
    }
}

impl ExportConfig {
    /// JPEG quality on the encoder's 1-100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        let q = if self.quality.is_nan() { 0.75 } else { self.quality };
        (q.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Decode an encoded image into an RGBA buffer.
///
/// # Errors
///
/// Returns `CodecError::InvalidFormat` if the format cannot be recognized
/// and `CodecError::CorruptedFile` if decoding fails.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::CorruptedFile(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| CodecError::InvalidFormat("unrecognized signature".to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| CodecError::CorruptedFile(e.to_string()))?;
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(?format, width, height, "decoded image");

    Ok(PixelBuffer {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Encode a buffer with the given settings.
///
/// # Errors
///
/// Returns `CodecError::InvalidDimensions` for an empty buffer,
/// `CodecError::InvalidPixelData` if the data length does not match the
/// dimensions and `CodecError::EncodingFailed` if the encoder fails.
pub fn export(buffer: &PixelBuffer, config: &ExportConfig) -> Result<Vec<u8>, CodecError> {
    let PixelBuffer { width, height, .. } = *buffer;
    if width == 0 || height == 0 {
        return Err(CodecError::InvalidDimensions { width, height });
    }
    let expected = PixelBuffer::byte_len(width, height);
    if buffer.pixels.len() != expected {
        return Err(CodecError::InvalidPixelData {
            expected,
            actual: buffer.pixels.len(),
        });
    }

    let mut out = Cursor::new(Vec::new());
    match config.format {
        ExportFormat::Jpeg => {
            let quality = config.jpeg_quality();
            debug!(width, height, quality, "export jpeg");
            let rgb: Vec<u8> = buffer
                .pixels
                .chunks_exact(CHANNELS)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            JpegEncoder::new_with_quality(&mut out, quality)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| CodecError::EncodingFailed(e.to_string()))?;
        }
        ExportFormat::Png => {
            debug!(width, height, "export png");
            PngEncoder::new(&mut out)
                .write_image(&buffer.pixels, width, height, ExtendedColorType::Rgba8)
                .map_err(|e| CodecError::EncodingFailed(e.to_string()))?;
        }
    }

    Ok(out.into_inner())
}
