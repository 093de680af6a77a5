//! Color types and utilities
//!
//! Colors are stored as four 8-bit channels so gradient steps are exact and
//! reproducible across platforms.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ARGB color with u8 components (0 to 255)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error returned when a color string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),

    #[error("color `{0}` must have 6 (RRGGBB) or 8 (AARRGGBB) hex digits")]
    BadLength(String),

    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

impl Color {
    pub const WHITE: Color = Color::argb(0xFF, 0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::argb(0xFF, 0x00, 0x00, 0x00);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    /// Create from a packed 0xAARRGGBB value
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack into a 0xAARRGGBB value
    pub const fn to_argb(&self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Parse `#AARRGGBB` or `#RRGGBB` (opaque)
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let Some(hex) = trimmed.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(input.to_string()));
        };
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::BadLength(input.to_string()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(input.to_string()));
        }
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| ColorParseError::BadDigit(input.to_string()))?;
        if hex.len() == 6 {
            Ok(Self::from_argb(0xFF00_0000 | value))
        } else {
            Ok(Self::from_argb(value))
        }
    }

    /// Interpolate towards `end`, see [`interpolate`]
    pub fn interpolate(self, end: Color, ratio: f32) -> Color {
        interpolate(self, end, ratio)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08x}", self.to_argb())
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Blend `start` towards `end` by `ratio`
///
/// `ratio` is clamped to [0, 1] (NaN counts as 0). Each channel moves by
/// `ceil((end - start) * ratio)`, so a channel that is decreasing rounds
/// toward `start` and an increasing one rounds toward `end`. Gradients drawn
/// from this match reference renders bit for bit.
pub fn interpolate(start: Color, end: Color, ratio: f32) -> Color {
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0) as f64
    };
    Color {
        a: channel(start.a, end.a, ratio),
        r: channel(start.r, end.r, ratio),
        g: channel(start.g, end.g, ratio),
        b: channel(start.b, end.b, ratio),
    }
}

#[inline]
fn channel(start: u8, end: u8, ratio: f64) -> u8 {
    let delta = (end as i32 - start as i32) as f64;
    let value = start as i32 + (delta * ratio).ceil() as i32;
    value.clamp(0, 255) as u8
}
