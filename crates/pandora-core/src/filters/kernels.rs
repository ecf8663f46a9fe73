//! Fixed convolution kernels used by the filter library.

use crate::convolve::Kernel;
use crate::error::PandoraResult;

pub(super) const SHARPEN: [f64; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

/// 5x5 unsharp mask, weights over 256.
pub(super) const SHARPEN2: [f64; 25] = [
    -1.0 / 256.0, -4.0 / 256.0, -6.0 / 256.0, -4.0 / 256.0, -1.0 / 256.0,
    -4.0 / 256.0, -16.0 / 256.0, -24.0 / 256.0, -16.0 / 256.0, -4.0 / 256.0,
    -6.0 / 256.0, -24.0 / 256.0, 476.0 / 256.0, -24.0 / 256.0, -6.0 / 256.0,
    -4.0 / 256.0, -16.0 / 256.0, -24.0 / 256.0, -16.0 / 256.0, -4.0 / 256.0,
    -1.0 / 256.0, -4.0 / 256.0, -6.0 / 256.0, -4.0 / 256.0, -1.0 / 256.0,
];

pub(super) const EMBOSS: [f64; 9] = [2.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0];

pub(super) const BOX_BLUR: [f64; 9] = [1.0 / 9.0; 9];

pub(super) const GAUSSIAN_BLUR: [f64; 9] = [
    1.0 / 16.0, 1.0 / 8.0, 1.0 / 16.0,
    1.0 / 8.0, 1.0 / 4.0, 1.0 / 8.0,
    1.0 / 16.0, 1.0 / 8.0, 1.0 / 16.0,
];

pub(super) const EDGE1: [f64; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

pub(super) const EDGE2: [f64; 9] = [0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0];

pub(super) const EDGE3: [f64; 9] = [1.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 1.0];

const MOTION_BLUR_SIDE: usize = 9;

/// 9x9 kernel averaging along the main diagonal.
pub(super) fn motion_blur() -> PandoraResult<Kernel> {
    let side = MOTION_BLUR_SIDE;
    let mut weights = vec![0.0; side * side];
    for i in 0..side {
        weights[i * side + i] = 1.0 / side as f64;
    }
    Kernel::new(weights)
}
