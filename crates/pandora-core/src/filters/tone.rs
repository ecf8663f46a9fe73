//! Per-pixel tone filters: grayscale, sepia, sepia2, noise, invert and HDR.
//!
//! These operate on raw RGBA slices and never touch alpha unless noted.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::tables::{SEPIA2_BLUE, SEPIA2_GREEN, SEPIA2_RED};
use crate::luminance::luminance;
use crate::{clamp_channel, CHANNELS};

/// Seed used by [`noise`] when the caller does not supply one.
pub const DEFAULT_NOISE_SEED: u64 = 0x5EED_0F_9A2D;

/// Blend each color channel toward its luminance.
///
/// `blend` (0 to 1) mixes the gray value with the original channel.
pub fn grayscale(pixels: &mut [u8], blend: f64) {
    let blend = blend.clamp(0.0, 1.0);
    trace!(blend, "grayscale");

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let lum = luminance(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        for c in chunk[..3].iter_mut() {
            *c = clamp_channel(lum * blend + *c as f64 * (1.0 - blend));
        }
    }
}

/// Classic sepia matrix, blended with the original by `blend` (0 to 1).
pub fn sepia(pixels: &mut [u8], blend: f64) {
    let blend = blend.clamp(0.0, 1.0);
    trace!(blend, "sepia");

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let r = chunk[0] as f64;
        let g = chunk[1] as f64;
        let b = chunk[2] as f64;
        let sr = 0.393 * r + 0.769 * g + 0.189 * b;
        let sg = 0.349 * r + 0.686 * g + 0.168 * b;
        let sb = 0.272 * r + 0.534 * g + 0.131 * b;
        chunk[0] = clamp_channel(sr * blend + r * (1.0 - blend));
        chunk[1] = clamp_channel(sg * blend + g * (1.0 - blend));
        chunk[2] = clamp_channel(sb * blend + b * (1.0 - blend));
    }
}

/// Warm vintage tone through fixed per-channel lookup tables.
pub fn sepia2(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        chunk[0] = SEPIA2_RED[chunk[0] as usize];
        chunk[1] = SEPIA2_GREEN[chunk[1] as usize];
        chunk[2] = SEPIA2_BLUE[chunk[2] as usize];
    }
}

/// Add uniform noise in `[-value, value]` (value up to 255).
///
/// Every channel of every pixel draws its own offset. Alpha is only touched
/// when `alpha` is set. The same seed always yields the same output.
pub fn noise(pixels: &mut [u8], value: f64, alpha: bool, seed: u64) {
    if value.is_nan() {
        return;
    }
    let amount = value.abs().min(255.0);
    if amount == 0.0 {
        return;
    }
    trace!(amount, alpha, seed, "noise");

    let mut rng = StdRng::seed_from_u64(seed);
    let touched = if alpha { CHANNELS } else { 3 };
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        for c in chunk[..touched].iter_mut() {
            *c = clamp_channel(*c as f64 + rng.gen_range(-amount..=amount));
        }
    }
}

/// Which channels [`invert`] touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMask {
    pub r: bool,
    pub g: bool,
    pub b: bool,
}

impl ChannelMask {
    pub const ALL: ChannelMask = ChannelMask {
        r: true,
        g: true,
        b: true,
    };

    /// An empty selection means every color channel.
    pub fn or_all(self) -> Self {
        if self.r || self.g || self.b {
            self
        } else {
            Self::ALL
        }
    }
}

/// Replace each selected channel `c` with `value - c`.
pub fn invert(pixels: &mut [u8], channels: ChannelMask, value: f64) {
    let channels = channels.or_all();
    let selected = [channels.r, channels.g, channels.b];
    let value = value.trunc();

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        for (c, _) in chunk[..3].iter_mut().zip(selected).filter(|(_, on)| *on) {
            *c = clamp_channel(value - *c as f64);
        }
    }
}

/// S-shaped contrast curve used by the HDR filter.
///
/// Shadows (1 to 127) are pulled down by `sin(π(90 - c/4)/180)`, highlights
/// by the mirrored factor. Zero stays zero.
#[inline]
pub fn change_contrast(c: f64) -> f64 {
    if c > 0.0 && c <= 127.0 {
        (PI * (90.0 - c / 4.0) / 180.0).sin() * c
    } else if c > 127.0 {
        (PI * (90.0 - (255.0 - c) / 4.0) / 180.0).sin() * c
    } else {
        c
    }
}

/// Apply [`change_contrast`] to every color channel.
pub fn hdr(pixels: &mut [u8]) {
    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        for c in chunk[..3].iter_mut() {
            *c = clamp_channel(change_contrast(*c as f64));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_full() {
        let mut px = vec![255, 0, 0, 90];
        grayscale(&mut px, 1.0);
        assert_eq!(px, vec![54, 54, 54, 90]);
    }

    #[test]
    fn test_grayscale_zero_blend_is_identity() {
        let mut px = vec![12, 200, 99, 255];
        grayscale(&mut px, 0.0);
        assert_eq!(px, vec![12, 200, 99, 255]);
    }

    #[test]
    fn test_sepia_white() {
        let mut px = vec![255, 255, 255, 255];
        sepia(&mut px, 1.0);
        // 0.937 * 255 ≈ 238.9
        assert_eq!(px, vec![255, 255, 239, 255]);
    }

    #[test]
    fn test_sepia2_tables() {
        let mut px = vec![0, 0, 0, 255, 255, 255, 255, 255];
        sepia2(&mut px);
        assert_eq!(px, vec![0, 0, 53, 255, 255, 255, 199, 255]);
    }

    #[test]
    fn test_noise_reproducible_with_seed() {
        let original: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
        let mut a = original.clone();
        let mut b = original.clone();
        noise(&mut a, 30.0, true, 42);
        noise(&mut b, 30.0, true, 42);
        assert_eq!(a, b);
        assert_ne!(a, original);
    }

    #[test]
    fn test_noise_bounded_and_alpha_untouched() {
        let original = vec![128u8; 4 * 50];
        let mut px = original.clone();
        noise(&mut px, 20.0, false, 7);
        for (chunk, orig) in px.chunks_exact(4).zip(original.chunks_exact(4)) {
            for i in 0..3 {
                assert!((chunk[i] as i32 - orig[i] as i32).abs() <= 20);
            }
            assert_eq!(chunk[3], 128);
        }
    }

    #[test]
    fn test_noise_channels_independent() {
        let mut px = vec![128u8; 4 * 50];
        noise(&mut px, 100.0, false, 3);
        let differing = px.chunks_exact(4).filter(|c| c[0] != c[1] || c[1] != c[2]).count();
        assert!(differing > 0);
    }

    #[test]
    fn test_noise_zero_is_identity() {
        let mut px = vec![1, 2, 3, 4];
        noise(&mut px, 0.0, true, 1);
        noise(&mut px, f64::NAN, true, 1);
        assert_eq!(px, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_invert_default() {
        let mut px = vec![10, 20, 30, 255];
        invert(&mut px, ChannelMask { r: false, g: false, b: false }, 255.0);
        assert_eq!(px, vec![245, 235, 225, 255]);
    }

    #[test]
    fn test_invert_selected_channel() {
        let mut px = vec![10, 20, 30, 255];
        invert(&mut px, ChannelMask { r: false, g: true, b: false }, 255.0);
        assert_eq!(px, vec![10, 235, 30, 255]);
    }

    #[test]
    fn test_invert_custom_value() {
        let mut px = vec![10, 200, 30, 255];
        invert(&mut px, ChannelMask::ALL, 100.9);
        assert_eq!(px, vec![90, 0, 70, 255]);
    }

    #[test]
    fn test_change_contrast() {
        assert_eq!(change_contrast(0.0), 0.0);
        assert!((change_contrast(255.0) - 255.0).abs() < 1e-9);
        assert!(change_contrast(127.0) < 127.0);
        assert!(change_contrast(128.0) < 128.0);
    }

    #[test]
    fn test_hdr_keeps_extremes() {
        let mut px = vec![0, 255, 64, 17];
        hdr(&mut px);
        assert_eq!(px[0], 0);
        assert_eq!(px[1], 255);
        assert!(px[2] < 64);
        assert_eq!(px[3], 17);
    }
}
