//! Luminance calculation using CIE / ITU-R BT.709 coefficients.
//!
//! Shared by the grayscale filter and the threshold adjustment.

/// BT.709 coefficient for the red channel.
pub const LUMINANCE_R: f64 = 0.2126;

/// BT.709 coefficient for the green channel.
pub const LUMINANCE_G: f64 = 0.7152;

/// BT.709 coefficient for the blue channel.
pub const LUMINANCE_B: f64 = 0.0722;

/// Calculate luminance from channel values on the 0-255 scale.
///
/// The result is on the same scale as the inputs and is not rounded.
#[inline]
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}
