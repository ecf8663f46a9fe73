//! The twelve built-in presets.
//!
//! Each preset is a fixed step list built from deterministic operations only,
//! so applying one twice to the same buffer gives byte-identical output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adjustments::Adjustment;
use crate::composite::BlendMode;
use crate::error::{PandoraError, PandoraResult};
use crate::fill::{Color, Fill, FillSource, Gradient};
use crate::filters::Filter;
use crate::pipeline::{Preset, Step};
use crate::PixelBuffer;

/// Built-in preset names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NamedPreset {
    Preset01,
    Preset02,
    Preset03,
    Preset04,
    Preset05,
    Preset06,
    Preset07,
    Preset08,
    Preset09,
    Preset10,
    Preset11,
    Preset12,
}

fn solid(mode: BlendMode, rgb: u32, opacity: f64) -> Step {
    Step::fill(Fill::new(mode, FillSource::Color(Color::hex(rgb)), opacity))
}

fn gradient(mode: BlendMode, gradient: Gradient, opacity: f64) -> Step {
    Step::fill(Fill::new(mode, FillSource::Gradient(gradient), opacity))
}

fn adjust(adjustment: Adjustment, params: &[f64]) -> Step {
    Step::adjust(adjustment, params)
}

fn filter(filter: Filter, params: &[f64]) -> Step {
    Step::filter(filter, params)
}

impl NamedPreset {
    pub const ALL: [NamedPreset; 12] = [
        NamedPreset::Preset01,
        NamedPreset::Preset02,
        NamedPreset::Preset03,
        NamedPreset::Preset04,
        NamedPreset::Preset05,
        NamedPreset::Preset06,
        NamedPreset::Preset07,
        NamedPreset::Preset08,
        NamedPreset::Preset09,
        NamedPreset::Preset10,
        NamedPreset::Preset11,
        NamedPreset::Preset12,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NamedPreset::Preset01 => "preset01",
            NamedPreset::Preset02 => "preset02",
            NamedPreset::Preset03 => "preset03",
            NamedPreset::Preset04 => "preset04",
            NamedPreset::Preset05 => "preset05",
            NamedPreset::Preset06 => "preset06",
            NamedPreset::Preset07 => "preset07",
            NamedPreset::Preset08 => "preset08",
            NamedPreset::Preset09 => "preset09",
            NamedPreset::Preset10 => "preset10",
            NamedPreset::Preset11 => "preset11",
            NamedPreset::Preset12 => "preset12",
        }
    }

    /// The ordered step list of this preset.
    pub fn steps(self) -> Vec<Step> {
        use Adjustment::*;
        use BlendMode::*;

        match self {
            NamedPreset::Preset01 => vec![
                solid(Difference, 0xdc2b3b, 0.22),
                gradient(SoftLight, Gradient::Pannacotta, 1.0),
                gradient(Luminosity, Gradient::Brick, 0.22),
                solid(ColorBurn, 0x93605c, 0.25),
                gradient(BlendMode::Saturation, Gradient::LightBrick, 0.22),
                adjust(Brightness, &[20.0]),
            ],
            NamedPreset::Preset02 => vec![
                solid(SoftLight, 0x03dbf0, 0.43),
                solid(Overlay, 0x9c4b4b, 0.70),
                solid(Difference, 0x293268, 0.30),
                adjust(Vibrance, &[80.0]),
                solid(Lighter, 0x293268, 0.05),
            ],
            NamedPreset::Preset03 => vec![
                solid(Multiply, 0xf7d9ad, 1.0),
                solid(SoftLight, 0x4e91f6, 0.61),
                solid(ColorDodge, 0x93615d, 0.35),
                gradient(SoftLight, Gradient::Sprite, 0.59),
                adjust(Brightness, &[-6.0]),
                adjust(Contrast, &[40.0]),
                adjust(ColorBalance, &[0.0, 35.0, 60.0]),
            ],
            NamedPreset::Preset04 => vec![
                filter(Filter::Sepia, &[0.6]),
                solid(Multiply, 0xf7d9ad, 0.3),
                adjust(Vibrance, &[-20.0]),
                adjust(Contrast, &[10.0]),
            ],
            NamedPreset::Preset05 => vec![
                filter(Filter::Grayscale, &[]),
                adjust(Contrast, &[30.0]),
                gradient(SoftLight, Gradient::BlackToWhite, 0.4),
            ],
            NamedPreset::Preset06 => vec![
                solid(Screen, 0x4e91f6, 0.15),
                adjust(Adjustment::Saturation, &[1.3]),
                adjust(Brightness, &[10.0]),
            ],
            NamedPreset::Preset07 => vec![
                gradient(ColorDodge, Gradient::Sprite, 0.2),
                adjust(Contrast, &[20.0]),
                adjust(Vibrance, &[40.0]),
            ],
            NamedPreset::Preset08 => vec![
                filter(Filter::Sepia2, &[]),
                solid(Overlay, 0x93605c, 0.25),
                adjust(Brightness, &[5.0]),
            ],
            NamedPreset::Preset09 => vec![
                adjust(Exposure, &[15.0]),
                gradient(SoftLight, Gradient::WhiteToBlack, 0.3),
                adjust(ColorBalance, &[10.0, 0.0, -15.0]),
            ],
            NamedPreset::Preset10 => vec![
                gradient(HardLight, Gradient::Pannacotta, 0.25),
                adjust(Adjustment::Saturation, &[0.8]),
                adjust(Gamma, &[1.05]),
            ],
            NamedPreset::Preset11 => vec![
                filter(Filter::Hdr, &[]),
                filter(Filter::Sharpen, &[0.5]),
                adjust(Vibrance, &[30.0]),
            ],
            NamedPreset::Preset12 => vec![
                solid(Exclusion, 0x293268, 0.2),
                gradient(Lighten, Gradient::LightBrick, 0.15),
                adjust(Contrast, &[15.0]),
                adjust(Brightness, &[-5.0]),
            ],
        }
    }

    /// The preset as a data value.
    pub fn preset(self) -> Preset {
        Preset::new(self.steps())
    }

    /// Apply the preset to `buffer`; see [`crate::pipeline::run`].
    pub fn apply(self, buffer: &mut PixelBuffer) -> PandoraResult<()> {
        debug!(preset = self.name(), "apply preset");
        self.preset().apply(buffer)
    }
}

impl fmt::Display for NamedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedPreset {
    type Err = PandoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedPreset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| PandoraError::unknown("preset", s))
    }
}

impl TryFrom<String> for NamedPreset {
    type Error = PandoraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NamedPreset> for String {
    fn from(value: NamedPreset) -> Self {
        value.name().to_string()
    }
}
