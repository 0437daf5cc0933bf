//! 8-bit-range RGB color types
//!
//! [`Rgb`] carries 0..=255 channel semantics in `f64` so values can leave the
//! range while they travel through the pipeline (jitter, error diffusion,
//! gamut transforms). [`Rgb8`] is the clamped and rounded form written to
//! output buffers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::ParseColorError;

/// An RGB color with 8-bit channel semantics (0.0..=255.0).
///
/// Values are not clamped on construction. Clamp with [`Rgb::clamped`] or
/// convert with [`Rgb::to_rgb8`] at sinks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red channel (0.0..=255.0 when in range)
    pub r: f64,
    /// Green channel (0.0..=255.0 when in range)
    pub g: f64,
    /// Blue channel (0.0..=255.0 when in range)
    pub b: f64,
}

impl Rgb {
    /// Black, the color of an empty gradient field.
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build from unit-range channels (0.0..=1.0).
    #[inline]
    pub fn from_unit(unit: [f64; 3]) -> Self {
        Self::new(unit[0] * 255.0, unit[1] * 255.0, unit[2] * 255.0)
    }

    /// Channels divided by 255. Not clamped.
    #[inline]
    pub fn to_unit(self) -> [f64; 3] {
        [self.r / 255.0, self.g / 255.0, self.b / 255.0]
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn from_array(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }

    /// Clamp every channel to 0.0..=255.0.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 255.0),
            self.g.clamp(0.0, 255.0),
            self.b.clamp(0.0, 255.0),
        )
    }

    /// Add the same offset to all three channels.
    #[inline]
    pub fn offset(self, amount: f64) -> Self {
        Self::new(self.r + amount, self.g + amount, self.b + amount)
    }

    /// Round and clamp to 8-bit channels.
    ///
    /// Non-finite channels become 0.
    #[inline]
    pub fn to_rgb8(self) -> Rgb8 {
        fn channel(v: f64) -> u8 {
            if v.is_finite() {
                v.round().clamp(0.0, 255.0) as u8
            } else {
                0
            }
        }
        Rgb8::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Rec. 601 luma in 0.0..=255.0.
    #[inline]
    pub fn luma(self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

/// An 8-bit RGB color as stored in pixel buffers.
///
/// Serializes as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb8> for Rgb {
    #[inline]
    fn from(c: Rgb8) -> Self {
        Rgb::new(c.r as f64, c.g as f64, c.b as f64)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb8> for String {
    fn from(c: Rgb8) -> Self {
        c.to_hex()
    }
}

impl FromStr for Rgb8 {
    type Err = ParseColorError;

    /// Parse a hex color.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` / `RRGGBB`
    /// - `#RGB` / `RGB` (each digit doubled)
    ///
    /// # Example
    /// ```
    /// use dither_core::Rgb8;
    /// let c: Rgb8 = "#f80".parse().unwrap();
    /// assert_eq!(c, Rgb8::new(0xff, 0x88, 0x00));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        // from_str_radix accepts a leading '+', which is not a hex digit
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(hex.to_string()));
        }

        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| ParseColorError::InvalidHex(hex.to_string()))
        };
        match hex.len() {
            6 => Ok(Rgb8::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => Ok(Rgb8::new(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            n => Err(ParseColorError::InvalidLength(n)),
        }
    }
}
