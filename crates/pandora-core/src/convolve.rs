//! Square-kernel convolution over RGBA pixel buffers.
//!
//! Out-of-range taps are skipped rather than clamped to the edge, so border
//! pixels only see the part of the kernel that overlaps the image.

use crate::error::{PandoraError, PandoraResult};
use crate::{clamp_channel, PixelBuffer, CHANNELS};
use tracing::debug;

/// An immutable square convolution kernel with an odd side length.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Vec<f64>,
    side: usize,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// The side is `round(sqrt(len))`; it must be odd and square to `len`.
    pub fn new(weights: Vec<f64>) -> PandoraResult<Self> {
        let side = (weights.len() as f64).sqrt().round() as usize;
        if side == 0 || side % 2 == 0 || side * side != weights.len() {
            return Err(PandoraError::InvalidKernel(weights.len()));
        }
        Ok(Self { weights, side })
    }

    /// Create a kernel from a fixed weight table.
    pub fn from_slice(weights: &[f64]) -> PandoraResult<Self> {
        Self::new(weights.to_vec())
    }

    /// Identity kernel: output equals input.
    pub fn identity() -> Self {
        Self {
            weights: vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
            side: 3,
        }
    }

    /// Side length of the kernel.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Row-major weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Convolve `src` with `kernel`, producing a buffer of the same size.
///
/// `offset` is added to the R, G and B sums. When `opaque` is set the
/// output alpha is forced to 255, otherwise it is the weighted alpha sum.
/// Sums are not clamped until the final byte write.
pub fn convolve(src: &PixelBuffer, kernel: &Kernel, offset: f64, opaque: bool) -> PixelBuffer {
    let width = src.width as usize;
    let height = src.height as usize;
    let side = kernel.side;
    let half = (side / 2) as isize;
    debug!(width, height, side, offset, opaque, "convolve");

    let weights = kernel.weights();
    let data = &src.pixels;
    let mut out = vec![0u8; data.len()];

    for y in 0..height {
        for x in 0..width {
            let (mut r, mut g, mut b, mut a) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);

            for ky in 0..side {
                let sy = y as isize + ky as isize - half;
                if sy < 0 || sy >= height as isize {
                    continue;
                }
                let row = sy as usize * width;
                let krow = &weights[ky * side..(ky + 1) * side];

                for (kx, &wt) in krow.iter().enumerate() {
                    let sx = x as isize + kx as isize - half;
                    if sx < 0 || sx >= width as isize {
                        continue;
                    }
                    let idx = (row + sx as usize) * CHANNELS;
                    r += data[idx] as f64 * wt;
                    g += data[idx + 1] as f64 * wt;
                    b += data[idx + 2] as f64 * wt;
                    a += data[idx + 3] as f64 * wt;
                }
            }

            let dst = (y * width + x) * CHANNELS;
            out[dst] = clamp_channel(offset + r);
            out[dst + 1] = clamp_channel(offset + g);
            out[dst + 2] = clamp_channel(offset + b);
            out[dst + 3] = if opaque { 255 } else { clamp_channel(a) };
        }
    }

    PixelBuffer {
        width: src.width,
        height: src.height,
        pixels: out,
    }
}
