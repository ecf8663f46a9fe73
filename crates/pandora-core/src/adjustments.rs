//! Tonal adjustments applied to RGBA pixel data.
//!
//! Every adjustment clamps its parameters to its own domain, transforms the
//! R, G and B channels with a closed-form per-pixel formula and leaves alpha
//! untouched.
//!
//! | Adjustment | Parameters | Domain |
//! |---|---|---|
//! | brightness | value | -150 to 150 |
//! | contrast | value | -50 to 100 |
//! | exposure | value | -100 to 100 |
//! | colorBalance | red, green, blue | -255 to 255 each |
//! | threshold | value (optional, default 127) | 0 to 255 |
//! | gamma | value | 0 to 5 |
//! | vibrance | value | -100 to 100 |
//! | saturation | factor | 0 to 10 |
//! | hue | degrees | 0 to 360 |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::color::{hsl_to_rgb, rgb_to_hsl};
use crate::error::{PandoraError, PandoraResult};
use crate::luminance::luminance;
use crate::{clamp_channel, PixelBuffer, CHANNELS};

/// Default threshold level when none is given.
pub const DEFAULT_THRESHOLD: f64 = 127.0;

/// Catalog of tonal adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Adjustment {
    Brightness,
    Contrast,
    Exposure,
    ColorBalance,
    Threshold,
    Gamma,
    Vibrance,
    Saturation,
    Hue,
}

impl Adjustment {
    /// Every adjustment in catalog order.
    pub const ALL: [Adjustment; 9] = [
        Adjustment::Brightness,
        Adjustment::Contrast,
        Adjustment::Exposure,
        Adjustment::ColorBalance,
        Adjustment::Threshold,
        Adjustment::Gamma,
        Adjustment::Vibrance,
        Adjustment::Saturation,
        Adjustment::Hue,
    ];

    /// Catalog name of the adjustment.
    pub fn name(self) -> &'static str {
        match self {
            Adjustment::Brightness => "brightness",
            Adjustment::Contrast => "contrast",
            Adjustment::Exposure => "exposure",
            Adjustment::ColorBalance => "colorBalance",
            Adjustment::Threshold => "threshold",
            Adjustment::Gamma => "gamma",
            Adjustment::Vibrance => "vibrance",
            Adjustment::Saturation => "saturation",
            Adjustment::Hue => "hue",
        }
    }

    /// Number of parameters that must be supplied.
    pub fn required_params(self) -> usize {
        match self {
            Adjustment::ColorBalance => 3,
            Adjustment::Threshold => 0,
            _ => 1,
        }
    }

    /// Apply the adjustment to a buffer in place.
    ///
    /// Fails with [`PandoraError::MissingParameters`] when `params` is shorter
    /// than [`Adjustment::required_params`]. Extra parameters are ignored.
    pub fn apply(self, buffer: &mut PixelBuffer, params: &[f64]) -> PandoraResult<()> {
        let expected = self.required_params();
        if params.len() < expected {
            return Err(PandoraError::MissingParameters {
                operation: self.name(),
                expected,
                actual: params.len(),
            });
        }

        let pixels = &mut buffer.pixels;
        match self {
            Adjustment::Brightness => brightness(pixels, params[0]),
            Adjustment::Contrast => contrast(pixels, params[0]),
            Adjustment::Exposure => exposure(pixels, params[0]),
            Adjustment::ColorBalance => color_balance(pixels, params[0], params[1], params[2]),
            Adjustment::Threshold => {
                threshold(pixels, params.first().copied().unwrap_or(DEFAULT_THRESHOLD))
            }
            Adjustment::Gamma => gamma(pixels, params[0]),
            Adjustment::Vibrance => vibrance(pixels, params[0]),
            Adjustment::Saturation => saturation(pixels, params[0]),
            Adjustment::Hue => hue(pixels, params[0]),
        }
        Ok(())
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Adjustment {
    type Err = PandoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Adjustment::ALL
            .into_iter()
            .find(|adj| adj.name() == s)
            .ok_or_else(|| PandoraError::unknown("adjustment", s))
    }
}

impl TryFrom<String> for Adjustment {
    type Error = PandoraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Adjustment> for String {
    fn from(value: Adjustment) -> Self {
        value.name().to_string()
    }
}

/// Apply `f` to the R, G and B channels of every pixel.
#[inline]
fn map_channels(pixels: &mut [u8], f: impl Fn(f64) -> f64) {
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        chunk[0] = clamp_channel(f(chunk[0] as f64));
        chunk[1] = clamp_channel(f(chunk[1] as f64));
        chunk[2] = clamp_channel(f(chunk[2] as f64));
    }
}

/// Add `value` (-150 to 150) to each color channel.
pub fn brightness(pixels: &mut [u8], value: f64) {
    let value = value.clamp(-150.0, 150.0);
    trace!(value, "brightness");
    map_channels(pixels, |c| c + value);
}

/// Scale channels around mid-gray.
///
/// Contrast ranges from -50 to 100.
///
/// Formula: `factor = 259 * (v + 255) / (255 * (259 - v))`,
/// `output = factor * (input - 128) + 128`
pub fn contrast(pixels: &mut [u8], value: f64) {
    let value = value.clamp(-50.0, 100.0);
    let factor = (259.0 * (value + 255.0)) / (255.0 * (259.0 - value));
    trace!(value, factor, "contrast");
    map_channels(pixels, |c| factor * (c - 128.0) + 128.0);
}

/// Raise each channel to the power `1 + value / 100`.
///
/// Exposure ranges from -100 to 100.
pub fn exposure(pixels: &mut [u8], value: f64) {
    let value = (value / 100.0).clamp(-1.0, 1.0);
    trace!(value, "exposure");
    map_channels(pixels, |c| c.powf(1.0 + value));
}

/// Shift each channel independently (-255 to 255 per channel).
pub fn color_balance(pixels: &mut [u8], red: f64, green: f64, blue: f64) {
    let red = red.clamp(-255.0, 255.0);
    let green = green.clamp(-255.0, 255.0);
    let blue = blue.clamp(-255.0, 255.0);
    trace!(red, green, blue, "color balance");

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        chunk[0] = clamp_channel(chunk[0] as f64 + red);
        chunk[1] = clamp_channel(chunk[1] as f64 + green);
        chunk[2] = clamp_channel(chunk[2] as f64 + blue);
    }
}

/// Turn each pixel black or white depending on its luminance.
///
/// Pixels whose luminance is strictly greater than `value` (0 to 255)
/// become white.
pub fn threshold(pixels: &mut [u8], value: f64) {
    let value = value.clamp(0.0, 255.0);
    trace!(value, "threshold");

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let lum = luminance(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let v = if lum > value { 255 } else { 0 };
        chunk[0] = v;
        chunk[1] = v;
        chunk[2] = v;
    }
}

/// Multiply each channel by `value²` (0 to 5).
pub fn gamma(pixels: &mut [u8], value: f64) {
    let value = value.clamp(0.0, 5.0);
    let factor = value * value;
    trace!(value, "gamma");
    map_channels(pixels, |c| c * factor);
}

/// Move the weaker channels relative to the strongest one.
///
/// Vibrance ranges from -100 to 100. Positive values push the non-maximum
/// channels away from the maximum (more vivid), negative values pull them
/// toward it. The effect is weighted by how far the maximum sits above the
/// channel average, so muted colors change less.
pub fn vibrance(pixels: &mut [u8], value: f64) {
    let level = -value.clamp(-100.0, 100.0);
    trace!(level, "vibrance");

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let r = chunk[0] as f64;
        let g = chunk[1] as f64;
        let b = chunk[2] as f64;
        let max = r.max(g).max(b);
        let avg = (r + g + b) / 3.0;
        let amount = ((max - avg).abs() * 2.0 / 255.0 * level) / 100.0;

        for c in chunk[..3].iter_mut() {
            let v = *c as f64;
            if v != max {
                *c = clamp_channel(v + (max - v) * amount);
            }
        }
    }
}

/// Scale HSL saturation by `factor` (0 to 10), capped at full saturation.
pub fn saturation(pixels: &mut [u8], factor: f64) {
    let factor = factor.clamp(0.0, 10.0);
    trace!(factor, "saturation");

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let hsl = rgb_to_hsl(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let s = (hsl.s * factor).clamp(0.0, 1.0);
        let rgb = hsl_to_rgb(hsl.h, s, hsl.l);
        chunk[0] = clamp_channel(rgb.r);
        chunk[1] = clamp_channel(rgb.g);
        chunk[2] = clamp_channel(rgb.b);
    }
}

/// Replace the HSL hue of every pixel with `degrees` (0 to 360).
pub fn hue(pixels: &mut [u8], degrees: f64) {
    let h = degrees.clamp(0.0, 360.0) / 360.0;
    trace!(h, "hue");

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let hsl = rgb_to_hsl(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        let rgb = hsl_to_rgb(h, hsl.s, hsl.l);
        chunk[0] = clamp_channel(rgb.r);
        chunk[1] = clamp_channel(rgb.g);
        chunk[2] = clamp_channel(rgb.b);
    }
}
