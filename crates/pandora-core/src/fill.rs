//! Whole-buffer fills with a solid color or a named gradient.
//!
//! A fill paints every pixel with its source color and composites it onto the
//! buffer with a [`BlendMode`] at a given opacity. Gradients run left to right
//! across the full width and are sampled at pixel centers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::composite::{composite_pixel, normalize_opacity, BlendMode};
use crate::error::{PandoraError, PandoraResult};
use crate::{clamp_channel, PixelBuffer, CHANNELS};

/// An opaque 8-bit RGB color, written as `#rrggbb` or `#rgb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Opaque RGBA pixel for this color.
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Hex notation, always the long lowercase form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = PandoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PandoraError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        match hex.len() {
            3 => Ok(Color::rgb(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
            6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = PandoraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Named two-stop linear gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gradient {
    BlackToWhite,
    WhiteToBlack,
    Pannacotta,
    LightBrick,
    Brick,
    Sprite,
}

impl Gradient {
    pub const ALL: [Gradient; 6] = [
        Gradient::BlackToWhite,
        Gradient::WhiteToBlack,
        Gradient::Pannacotta,
        Gradient::LightBrick,
        Gradient::Brick,
        Gradient::Sprite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Gradient::BlackToWhite => "blackToWhite",
            Gradient::WhiteToBlack => "whiteToBlack",
            Gradient::Pannacotta => "pannacotta",
            Gradient::LightBrick => "light-brick",
            Gradient::Brick => "brick",
            Gradient::Sprite => "sprite",
        }
    }

    /// Start (left) and end (right) colors.
    pub fn stops(self) -> (Color, Color) {
        const BRICK_RED: Color = Color::rgb(220, 43, 59);
        match self {
            Gradient::BlackToWhite => (Color::BLACK, Color::WHITE),
            Gradient::WhiteToBlack => (Color::WHITE, Color::BLACK),
            Gradient::Pannacotta => (BRICK_RED, Color::rgb(175, 214, 211)),
            // Both brick variants share their stops
            Gradient::LightBrick | Gradient::Brick => (BRICK_RED, Color::rgb(147, 96, 92)),
            Gradient::Sprite => (Color::rgb(78, 145, 246), Color::rgb(241, 251, 54)),
        }
    }

    /// Interpolated color at `t` in 0-1 (clamped).
    pub fn color_at(self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let (start, end) = self.stops();
        let lerp = |a: u8, b: u8| clamp_channel(a as f64 + (b as f64 - a as f64) * t);
        Color::rgb(lerp(start.r, end.r), lerp(start.g, end.g), lerp(start.b, end.b))
    }
}

impl FromStr for Gradient {
    type Err = PandoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gradient::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| PandoraError::unknown("gradient", s))
    }
}

impl TryFrom<String> for Gradient {
    type Error = PandoraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Gradient> for String {
    fn from(value: Gradient) -> Self {
        value.name().to_string()
    }
}

/// What a fill paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillSource {
    Color(Color),
    Gradient(Gradient),
}

impl FillSource {
    /// Parse a `("color", "#hex")` or `("gradient", "name")` pair.
    pub fn parse(kind: &str, value: &str) -> PandoraResult<Self> {
        match kind {
            "color" => Ok(FillSource::Color(value.parse()?)),
            "gradient" => Ok(FillSource::Gradient(value.parse()?)),
            other => Err(PandoraError::unknown("fill source", other)),
        }
    }
}

fn default_opacity() -> f64 {
    1.0
}

/// A blend-mode fill step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    #[serde(default)]
    pub mode: BlendMode,
    pub source: FillSource,
    /// Opacity (0.0 to 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Fill {
    /// Create a fill, clamping opacity to 0-1 (NaN becomes 1).
    pub fn new(mode: BlendMode, source: FillSource, opacity: f64) -> Self {
        Self {
            mode,
            source,
            opacity: normalize_opacity(opacity),
        }
    }

    /// Build a fill from its textual parts: blend mode name, source kind
    /// (`color` or `gradient`), source value and opacity.
    pub fn from_parts(mode: &str, kind: &str, value: &str, opacity: f64) -> PandoraResult<Self> {
        Ok(Self::new(mode.parse()?, FillSource::parse(kind, value)?, opacity))
    }

    /// Composite this fill over every pixel of `buffer`.
    pub fn apply(&self, buffer: &mut PixelBuffer) {
        apply_fill(buffer, self);
    }
}

/// Composite `fill` over every pixel of `buffer` in place.
pub fn apply_fill(buffer: &mut PixelBuffer, fill: &Fill) {
    let width = buffer.width as usize;
    if width == 0 || buffer.is_empty() {
        return;
    }
    debug!(mode = %fill.mode, opacity = fill.opacity, "fill");

    // One source color per column
    let columns: Vec<[u8; 4]> = match fill.source {
        FillSource::Color(color) => vec![color.to_rgba(); width],
        FillSource::Gradient(gradient) => (0..width)
            .map(|x| gradient.color_at((x as f64 + 0.5) / width as f64).to_rgba())
            .collect(),
    };

    for row in buffer.pixels.chunks_exact_mut(width * CHANNELS) {
        for (px, src) in row.chunks_exact_mut(CHANNELS).zip(&columns) {
            let out = composite_pixel(fill.mode, [px[0], px[1], px[2], px[3]], *src, fill.opacity);
            px.copy_from_slice(&out);
        }
    }
}
