//! Blend modes and alpha compositing.
//!
//! Mode names follow the canvas `globalCompositeOperation` vocabulary. The
//! math is the W3C Compositing and Blending Level 1 model on straight-alpha
//! inputs normalized to 0-1:
//!
//! ```text
//! Cs' = (1 - αb) * Cs + αb * B(Cb, Cs)
//! co  = αs * Cs' + (1 - αs) * αb * Cb
//! αo  = αs + αb * (1 - αs)
//! ```
//!
//! The written color is `co / αo`. `lighter` is the exception: it adds the
//! premultiplied colors and saturates both color and alpha at 1.
//!
//! # Blend Modes
//!
//! - Separable: [`BlendMode::Multiply`], [`BlendMode::Screen`],
//!   [`BlendMode::Overlay`], [`BlendMode::Darken`], [`BlendMode::Lighten`],
//!   [`BlendMode::ColorDodge`], [`BlendMode::ColorBurn`],
//!   [`BlendMode::HardLight`], [`BlendMode::SoftLight`],
//!   [`BlendMode::Difference`], [`BlendMode::Exclusion`]
//! - Non-separable: [`BlendMode::Hue`], [`BlendMode::Saturation`],
//!   [`BlendMode::Color`], [`BlendMode::Luminosity`]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PandoraError, PandoraResult};
use crate::{clamp_channel, PixelBuffer, CHANNELS};

/// Blend mode for fills and layer compositing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlendMode {
    /// Plain alpha compositing (source-over).
    #[default]
    SourceOver,
    /// Additive, premultiplied (lighter).
    Lighter,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// Every blend mode.
    pub const ALL: [BlendMode; 17] = [
        BlendMode::SourceOver,
        BlendMode::Lighter,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ];

    /// Canvas composite-operation name.
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::SourceOver => "source-over",
            BlendMode::Lighter => "lighter",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
            BlendMode::Hue => "hue",
            BlendMode::Saturation => "saturation",
            BlendMode::Color => "color",
            BlendMode::Luminosity => "luminosity",
        }
    }

    /// Blend a normalized backdrop color with a normalized source color.
    pub fn blend(self, cb: [f64; 3], cs: [f64; 3]) -> [f64; 3] {
        match self {
            BlendMode::Hue => set_lum(set_sat(cs, sat(cb)), lum(cb)),
            BlendMode::Saturation => set_lum(set_sat(cb, sat(cs)), lum(cb)),
            BlendMode::Color => set_lum(cs, lum(cb)),
            BlendMode::Luminosity => set_lum(cb, lum(cs)),
            _ => [
                self.blend_channel(cb[0], cs[0]),
                self.blend_channel(cb[1], cs[1]),
                self.blend_channel(cb[2], cs[2]),
            ],
        }
    }

    /// Separable blend function `B(cb, cs)`.
    ///
    /// Non-separable modes return the source channel.
    fn blend_channel(self, cb: f64, cs: f64) -> f64 {
        match self {
            BlendMode::Multiply => cb * cs,
            BlendMode::Screen => screen(cb, cs),
            BlendMode::Overlay => hard_light(cs, cb),
            BlendMode::Darken => cb.min(cs),
            BlendMode::Lighten => cb.max(cs),
            BlendMode::ColorDodge => {
                if cb == 0.0 {
                    0.0
                } else if cs >= 1.0 {
                    1.0
                } else {
                    (cb / (1.0 - cs)).min(1.0)
                }
            }
            BlendMode::ColorBurn => {
                if cb >= 1.0 {
                    1.0
                } else if cs == 0.0 {
                    0.0
                } else {
                    1.0 - ((1.0 - cb) / cs).min(1.0)
                }
            }
            BlendMode::HardLight => hard_light(cb, cs),
            BlendMode::SoftLight => soft_light(cb, cs),
            BlendMode::Difference => (cb - cs).abs(),
            BlendMode::Exclusion => cb + cs - 2.0 * cb * cs,
            _ => cs,
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendMode {
    type Err = PandoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlendMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| PandoraError::unknown("blend mode", s))
    }
}

impl TryFrom<String> for BlendMode {
    type Error = PandoraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BlendMode> for String {
    fn from(value: BlendMode) -> Self {
        value.name().to_string()
    }
}

#[inline]
fn screen(cb: f64, cs: f64) -> f64 {
    cb + cs - cb * cs
}

#[inline]
fn hard_light(cb: f64, cs: f64) -> f64 {
    if cs <= 0.5 {
        cb * 2.0 * cs
    } else {
        screen(cb, 2.0 * cs - 1.0)
    }
}

#[inline]
fn soft_light(cb: f64, cs: f64) -> f64 {
    if cs <= 0.5 {
        cb - (1.0 - 2.0 * cs) * cb * (1.0 - cb)
    } else {
        let d = if cb <= 0.25 {
            ((16.0 * cb - 12.0) * cb + 4.0) * cb
        } else {
            cb.sqrt()
        };
        cb + (2.0 * cs - 1.0) * (d - cb)
    }
}

// ============================================================================
// Non-separable helpers
// ============================================================================

#[inline]
fn lum(c: [f64; 3]) -> f64 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn clip_color(c: [f64; 3]) -> [f64; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;

    if n < 0.0 && l - n > 0.0 {
        out = out.map(|v| l + (v - l) * l / (l - n));
    }
    if x > 1.0 && x - l > 0.0 {
        out = out.map(|v| l + (v - l) * (1.0 - l) / (x - l));
    }
    out
}

fn set_lum(c: [f64; 3], l: f64) -> [f64; 3] {
    let d = l - lum(c);
    clip_color(c.map(|v| v + d))
}

#[inline]
fn sat(c: [f64; 3]) -> f64 {
    c[0].max(c[1]).max(c[2]) - c[0].min(c[1]).min(c[2])
}

fn set_sat(c: [f64; 3], s: f64) -> [f64; 3] {
    let min = c[0].min(c[1]).min(c[2]);
    let max = c[0].max(c[1]).max(c[2]);
    if max > min {
        c.map(|v| (v - min) * s / (max - min))
    } else {
        [0.0; 3]
    }
}

// ============================================================================
// Pixel and buffer compositing
// ============================================================================

/// Clamp a layer opacity to 0-1.
///
/// NaN is treated as fully opaque, the same as an omitted opacity.
#[inline]
pub fn normalize_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        1.0
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Composite a straight-alpha source pixel onto a backdrop pixel.
///
/// `opacity` (see [`normalize_opacity`]) scales the source alpha, like a
/// canvas `globalAlpha`.
pub fn composite_pixel(mode: BlendMode, backdrop: [u8; 4], source: [u8; 4], opacity: f64) -> [u8; 4] {
    let opacity = normalize_opacity(opacity);
    let cb = [backdrop[0], backdrop[1], backdrop[2]].map(|v| v as f64 / 255.0);
    let cs = [source[0], source[1], source[2]].map(|v| v as f64 / 255.0);
    let ab = backdrop[3] as f64 / 255.0;
    let as_ = source[3] as f64 / 255.0 * opacity;

    let (co, ao) = if mode == BlendMode::Lighter {
        let ao = (as_ + ab).min(1.0);
        let co = [0, 1, 2].map(|i| (as_ * cs[i] + ab * cb[i]).min(1.0));
        (co, ao)
    } else {
        let mixed = mode.blend(cb, cs);
        let ao = as_ + ab * (1.0 - as_);
        let co = [0, 1, 2].map(|i| {
            let cs_mixed = (1.0 - ab) * cs[i] + ab * mixed[i];
            as_ * cs_mixed + (1.0 - as_) * ab * cb[i]
        });
        (co, ao)
    };

    if ao <= 0.0 {
        return [0, 0, 0, 0];
    }
    [
        clamp_channel(co[0] / ao * 255.0),
        clamp_channel(co[1] / ao * 255.0),
        clamp_channel(co[2] / ao * 255.0),
        clamp_channel(ao * 255.0),
    ]
}

/// Composite `layer` onto `backdrop` in place.
///
/// Both buffers must have the same dimensions.
pub fn composite_layer(
    backdrop: &mut PixelBuffer,
    layer: &PixelBuffer,
    mode: BlendMode,
    opacity: f64,
) -> PandoraResult<()> {
    if (backdrop.width, backdrop.height) != (layer.width, layer.height) {
        return Err(PandoraError::InvalidBuffer {
            expected: backdrop.pixels.len(),
            actual: layer.pixels.len(),
        });
    }

    for (dst, src) in backdrop
        .pixels
        .chunks_exact_mut(CHANNELS)
        .zip(layer.pixels.chunks_exact(CHANNELS))
    {
        let out = composite_pixel(
            mode,
            [dst[0], dst[1], dst[2], dst[3]],
            [src[0], src[1], src[2], src[3]],
            opacity,
        );
        dst.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPAQUE_BLACK: [u8; 4] = [0, 0, 0, 255];

    fn lum_u8(px: [u8; 4]) -> f64 {
        0.3 * px[0] as f64 + 0.59 * px[1] as f64 + 0.11 * px[2] as f64
    }

    #[test]
    fn test_names_round_trip() {
        for mode in BlendMode::ALL {
            assert_eq!(mode.name().parse::<BlendMode>().unwrap(), mode);
        }
        assert!("dissolve".parse::<BlendMode>().is_err());
    }

    #[test]
    fn test_default_is_source_over() {
        assert_eq!(BlendMode::default(), BlendMode::SourceOver);
    }

    #[test]
    fn test_source_over_opaque_replaces() {
        let out = composite_pixel(BlendMode::SourceOver, [10, 20, 30, 255], [200, 100, 50, 255], 1.0);
        assert_eq!(out, [200, 100, 50, 255]);
    }

    #[test]
    fn test_source_over_half_opacity() {
        let out = composite_pixel(BlendMode::SourceOver, OPAQUE_BLACK, [255, 255, 255, 255], 0.5);
        assert_eq!(out, [128, 128, 128, 255]);
    }

    #[test]
    fn test_nan_opacity_is_opaque() {
        assert_eq!(normalize_opacity(f64::NAN), 1.0);
        assert_eq!(normalize_opacity(-0.5), 0.0);
        let out = composite_pixel(BlendMode::SourceOver, [10, 20, 30, 255], [200, 100, 50, 255], f64::NAN);
        assert_eq!(out, [200, 100, 50, 255]);
    }

    #[test]
    fn test_source_over_transparent_backdrop() {
        let out = composite_pixel(BlendMode::SourceOver, [0, 0, 0, 0], [255, 0, 0, 255], 0.5);
        assert_eq!(out, [255, 0, 0, 128]);
    }

    #[test]
    fn test_both_transparent() {
        let out = composite_pixel(BlendMode::Multiply, [9, 9, 9, 0], [9, 9, 9, 0], 1.0);
        assert_eq!(out, [0, 0, 0, 0]);
    }

    #[test]
    fn test_multiply() {
        let out = composite_pixel(BlendMode::Multiply, [255, 128, 0, 255], [128, 128, 128, 255], 1.0);
        assert_eq!(out, [128, 64, 0, 255]);
    }

    #[test]
    fn test_screen_on_black() {
        let out = composite_pixel(BlendMode::Screen, OPAQUE_BLACK, [10, 20, 30, 255], 1.0);
        assert_eq!(out, [10, 20, 30, 255]);
    }

    #[test]
    fn test_darken_lighten() {
        let dst = [100, 200, 50, 255];
        let src = [150, 100, 50, 255];
        assert_eq!(composite_pixel(BlendMode::Darken, dst, src, 1.0), [100, 100, 50, 255]);
        assert_eq!(composite_pixel(BlendMode::Lighten, dst, src, 1.0), [150, 200, 50, 255]);
    }

    #[test]
    fn test_difference_and_exclusion() {
        let out = composite_pixel(BlendMode::Difference, [200, 50, 0, 255], [50, 100, 0, 255], 1.0);
        assert_eq!(out, [150, 50, 0, 255]);

        // Exclusion with white inverts
        let out = composite_pixel(BlendMode::Exclusion, [200, 50, 0, 255], [255, 255, 255, 255], 1.0);
        assert_eq!(out, [55, 205, 255, 255]);
    }

    #[test]
    fn test_lighter_adds_and_saturates() {
        let out = composite_pixel(BlendMode::Lighter, [100, 100, 100, 255], [100, 200, 50, 255], 1.0);
        assert_eq!(out, [200, 255, 150, 255]);
    }

    #[test]
    fn test_dodge_and_burn_extremes() {
        assert_eq!(composite_pixel(BlendMode::ColorDodge, OPAQUE_BLACK, [200, 200, 200, 255], 1.0), OPAQUE_BLACK);
        assert_eq!(
            composite_pixel(BlendMode::ColorBurn, [255, 255, 255, 255], [10, 10, 10, 255], 1.0),
            [255, 255, 255, 255]
        );
    }

    #[test]
    fn test_overlay_keeps_black_and_white() {
        let src = [90, 160, 220, 255];
        assert_eq!(composite_pixel(BlendMode::Overlay, OPAQUE_BLACK, src, 1.0), OPAQUE_BLACK);
        assert_eq!(
            composite_pixel(BlendMode::Overlay, [255, 255, 255, 255], src, 1.0),
            [255, 255, 255, 255]
        );
    }

    #[test]
    fn test_saturation_of_gray_backdrop_stays_gray() {
        let out = composite_pixel(BlendMode::Saturation, [120, 120, 120, 255], [255, 0, 0, 255], 1.0);
        assert_eq!(out, [120, 120, 120, 255]);
    }

    #[test]
    fn test_color_keeps_backdrop_luminosity() {
        let out = composite_pixel(BlendMode::Color, [128, 128, 128, 255], [255, 0, 0, 255], 1.0);
        assert!(out[0] > out[1]);
        assert_eq!(out[1], out[2]);
        assert!((lum_u8(out) - 128.0).abs() < 2.0);
    }

    #[test]
    fn test_luminosity_takes_source_luminosity() {
        let out = composite_pixel(BlendMode::Luminosity, [255, 0, 0, 255], [128, 128, 128, 255], 1.0);
        assert!(out[0] > out[1]);
        assert!((lum_u8(out) - 128.0).abs() < 2.0);
    }

    #[test]
    fn test_hue_takes_source_hue() {
        let out = composite_pixel(BlendMode::Hue, [200, 60, 60, 255], [0, 0, 255, 255], 1.0);
        assert!(out[2] > out[0] && out[2] > out[1]);
    }

    #[test]
    fn test_composite_layer() {
        let mut dst = PixelBuffer::filled(2, 1, OPAQUE_BLACK);
        let layer = PixelBuffer::filled(2, 1, [255, 255, 255, 255]);
        composite_layer(&mut dst, &layer, BlendMode::SourceOver, 1.0).unwrap();
        assert_eq!(dst.pixels, vec![255; 8]);
    }

    #[test]
    fn test_composite_layer_size_mismatch() {
        let mut dst = PixelBuffer::filled(2, 1, OPAQUE_BLACK);
        let layer = PixelBuffer::filled(1, 2, OPAQUE_BLACK);
        assert!(composite_layer(&mut dst, &layer, BlendMode::SourceOver, 1.0).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn mode_strategy() -> impl Strategy<Value = BlendMode> {
        prop::sample::select(BlendMode::ALL.to_vec())
    }

    proptest! {
        /// Property: A zero-opacity source never changes a visible backdrop.
        #[test]
        fn prop_zero_opacity_is_identity(
            mode in mode_strategy(),
            r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), a in 1u8..=255,
            src in any::<[u8; 4]>(),
        ) {
            let out = composite_pixel(mode, [r, g, b, a], src, 0.0);
            prop_assert_eq!(out, [r, g, b, a]);
        }

        /// Property: Compositing onto an opaque backdrop keeps it opaque.
        #[test]
        fn prop_opaque_backdrop_stays_opaque(
            mode in mode_strategy(),
            r in any::<u8>(), g in any::<u8>(), b in any::<u8>(),
            src in any::<[u8; 4]>(),
            opacity in 0.0f64..=1.0,
        ) {
            let out = composite_pixel(mode, [r, g, b, 255], src, opacity);
            prop_assert_eq!(out[3], 255);
        }
    }
}
