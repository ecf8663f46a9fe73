//! Filter library: tone filters, convolution filters and the fast blur.
//!
//! Filters are looked up by name and take an optional positional parameter
//! list:
//!
//! | Filter | Parameters |
//! |---|---|
//! | grayscale, sepia | `[blend=1]` |
//! | sepia2, HDR | none |
//! | noise | `value [alpha=0] [seed]` |
//! | invert | `[r] [g] [b] [value=255]` |
//! | sharpen, sharpen2 | `[opacity=1]` |
//! | emboss, boxBlur, gaussianBlur, edge1, edge2, edge3, motionBlur | none |
//! | blur | `[iterations=1] [radius=10]` |

mod kernels;
mod tables;
pub mod tone;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::blur::box_blur;
use crate::composite::{composite_layer, normalize_opacity, BlendMode};
use crate::convolve::{convolve, Kernel};
use crate::error::{PandoraError, PandoraResult};
use crate::PixelBuffer;

pub use tone::{ChannelMask, DEFAULT_NOISE_SEED};

/// Radius of the `blur` filter when none is given.
pub const DEFAULT_BLUR_RADIUS: f64 = 10.0;

/// Catalog of filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Filter {
    Grayscale,
    Sepia,
    Sepia2,
    Noise,
    Invert,
    Hdr,
    Sharpen,
    Sharpen2,
    Emboss,
    BoxBlur,
    GaussianBlur,
    Edge1,
    Edge2,
    Edge3,
    MotionBlur,
    Blur,
}

impl Filter {
    /// Every filter in catalog order.
    pub const ALL: [Filter; 16] = [
        Filter::Grayscale,
        Filter::Sepia,
        Filter::Sepia2,
        Filter::Noise,
        Filter::Invert,
        Filter::Hdr,
        Filter::Sharpen,
        Filter::Sharpen2,
        Filter::Emboss,
        Filter::BoxBlur,
        Filter::GaussianBlur,
        Filter::Edge1,
        Filter::Edge2,
        Filter::Edge3,
        Filter::MotionBlur,
        Filter::Blur,
    ];

    /// Catalog name of the filter.
    pub fn name(self) -> &'static str {
        match self {
            Filter::Grayscale => "grayscale",
            Filter::Sepia => "sepia",
            Filter::Sepia2 => "sepia2",
            Filter::Noise => "noise",
            Filter::Invert => "invert",
            Filter::Hdr => "HDR",
            Filter::Sharpen => "sharpen",
            Filter::Sharpen2 => "sharpen2",
            Filter::Emboss => "emboss",
            Filter::BoxBlur => "boxBlur",
            Filter::GaussianBlur => "gaussianBlur",
            Filter::Edge1 => "edge1",
            Filter::Edge2 => "edge2",
            Filter::Edge3 => "edge3",
            Filter::MotionBlur => "motionBlur",
            Filter::Blur => "blur",
        }
    }

    /// Number of parameters that must be supplied.
    pub fn required_params(self) -> usize {
        match self {
            Filter::Noise => 1,
            _ => 0,
        }
    }

    /// Apply the filter to a buffer.
    ///
    /// Convolution filters replace the buffer contents with a same-sized
    /// result; the others edit pixels in place.
    pub fn apply(self, buffer: &mut PixelBuffer, params: &[f64]) -> PandoraResult<()> {
        let expected = self.required_params();
        if params.len() < expected {
            return Err(PandoraError::MissingParameters {
                operation: self.name(),
                expected,
                actual: params.len(),
            });
        }
        let param = |i: usize| params.get(i).copied();
        // Noise takes any nonzero alpha flag, invert selects a channel only with 1
        let truthy = |i: usize| param(i).is_some_and(|v| v != 0.0 && !v.is_nan());
        let selected = |i: usize| param(i) == Some(1.0);

        match self {
            Filter::Grayscale => tone::grayscale(&mut buffer.pixels, param(0).unwrap_or(1.0)),
            Filter::Sepia => tone::sepia(&mut buffer.pixels, param(0).unwrap_or(1.0)),
            Filter::Sepia2 => tone::sepia2(&mut buffer.pixels),
            Filter::Noise => {
                let seed = param(2).map_or(DEFAULT_NOISE_SEED, |s| s as u64);
                tone::noise(&mut buffer.pixels, params[0], truthy(1), seed);
            }
            Filter::Invert => {
                let mask = ChannelMask {
                    r: selected(0),
                    g: selected(1),
                    b: selected(2),
                };
                tone::invert(&mut buffer.pixels, mask, param(3).unwrap_or(255.0));
            }
            Filter::Hdr => tone::hdr(&mut buffer.pixels),
            Filter::Sharpen => {
                let kernel = Kernel::from_slice(&kernels::SHARPEN)?;
                sharpen_with(buffer, &kernel, false, param(0).unwrap_or(1.0))?;
            }
            Filter::Sharpen2 => {
                let kernel = Kernel::from_slice(&kernels::SHARPEN2)?;
                sharpen_with(buffer, &kernel, true, param(0).unwrap_or(1.0))?;
            }
            Filter::Emboss => convolve_in_place(buffer, &Kernel::from_slice(&kernels::EMBOSS)?, 127.0, true),
            Filter::BoxBlur => convolve_in_place(buffer, &Kernel::from_slice(&kernels::BOX_BLUR)?, 0.0, false),
            Filter::GaussianBlur => {
                convolve_in_place(buffer, &Kernel::from_slice(&kernels::GAUSSIAN_BLUR)?, 0.0, false)
            }
            Filter::Edge1 => convolve_in_place(buffer, &Kernel::from_slice(&kernels::EDGE1)?, 0.0, true),
            Filter::Edge2 => convolve_in_place(buffer, &Kernel::from_slice(&kernels::EDGE2)?, 0.0, true),
            Filter::Edge3 => convolve_in_place(buffer, &Kernel::from_slice(&kernels::EDGE3)?, 0.0, true),
            Filter::MotionBlur => convolve_in_place(buffer, &kernels::motion_blur()?, 0.0, false),
            Filter::Blur => box_blur(
                buffer,
                param(1).unwrap_or(DEFAULT_BLUR_RADIUS),
                param(0).unwrap_or(1.0),
            ),
        }
        Ok(())
    }
}

fn convolve_in_place(buffer: &mut PixelBuffer, kernel: &Kernel, offset: f64, opaque: bool) {
    *buffer = convolve(buffer, kernel, offset, opaque);
}

/// Convolve with a sharpening kernel and draw the result over the original
/// at `opacity`.
fn sharpen_with(buffer: &mut PixelBuffer, kernel: &Kernel, opaque: bool, opacity: f64) -> PandoraResult<()> {
    let opacity = normalize_opacity(opacity);
    debug!(side = kernel.side(), opacity, "sharpen");
    let sharpened = convolve(buffer, kernel, 0.0, opaque);
    composite_layer(buffer, &sharpened, BlendMode::SourceOver, opacity)
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = PandoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|filter| filter.name() == s)
            .ok_or_else(|| PandoraError::unknown("filter", s))
    }
}

impl TryFrom<String> for Filter {
    type Error = PandoraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Filter> for String {
    fn from(value: Filter) -> Self {
        value.name().to_string()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=10, 1u32..=10).prop_flat_map(|(w, h)| {
            let len = PixelBuffer::byte_len(w, h);
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| PixelBuffer { width: w, height: h, pixels })
        })
    }

    proptest! {
        /// Property: Every filter preserves the buffer dimensions.
        #[test]
        fn prop_filters_preserve_dimensions(
            src in buffer_strategy(),
            filter in prop::sample::select(Filter::ALL.to_vec()),
        ) {
            let mut buf = src.clone();
            filter.apply(&mut buf, &[10.0]).unwrap();
            prop_assert_eq!((buf.width, buf.height), (src.width, src.height));
            prop_assert_eq!(buf.pixels.len(), src.pixels.len());
        }
    }
}
