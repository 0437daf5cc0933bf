//! Named color spaces and the tagged [`ColorVector`] union
//!
//! Every space converts to and from gamma-encoded unit RGB. Hue-bearing
//! spaces (HSL, HSV, HWB, LCh, OKLCH) keep hue in degrees and mix it along the
//! shorter arc.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lab::{Lab, Lch};
use super::oklab::{Oklab, Oklch};
use super::transfer::{linear_to_srgb, srgb_to_linear};

/// Per-channel weights of the `weighted-rgb` distance space (Rec. 601 luma
/// coefficients, square-rooted so squared distances carry the luma weights).
const WEIGHTED_RGB: [f64; 3] = [0.546_808_9, 0.766_159_0, 0.337_638_9];

/// A named color space used for interpolation, statistics and distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorSpace {
    #[default]
    Rgb,
    LinearRgb,
    WeightedRgb,
    Hsl,
    Hsv,
    Hwb,
    Cmy,
    Cmyk,
    Lab,
    Lch,
    Oklab,
    Oklch,
    YCbCr,
}

impl ColorSpace {
    /// All spaces, in menu order.
    pub const ALL: [ColorSpace; 13] = [
        ColorSpace::Rgb,
        ColorSpace::LinearRgb,
        ColorSpace::WeightedRgb,
        ColorSpace::Hsl,
        ColorSpace::Hsv,
        ColorSpace::Hwb,
        ColorSpace::Cmy,
        ColorSpace::Cmyk,
        ColorSpace::Lab,
        ColorSpace::Lch,
        ColorSpace::Oklab,
        ColorSpace::Oklch,
        ColorSpace::YCbCr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::LinearRgb => "linear-rgb",
            ColorSpace::WeightedRgb => "weighted-rgb",
            ColorSpace::Hsl => "hsl",
            ColorSpace::Hsv => "hsv",
            ColorSpace::Hwb => "hwb",
            ColorSpace::Cmy => "cmy",
            ColorSpace::Cmyk => "cmyk",
            ColorSpace::Lab => "lab",
            ColorSpace::Lch => "lch",
            ColorSpace::Oklab => "oklab",
            ColorSpace::Oklch => "oklch",
            ColorSpace::YCbCr => "ycbcr",
        }
    }

    /// Look a space up by name (case-insensitive).
    ///
    /// Unknown names resolve to [`ColorSpace::Rgb`]: the input is treated as
    /// already being RGB.
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim().to_ascii_lowercase();
        match Self::ALL.into_iter().find(|s| s.name() == wanted) {
            Some(space) => space,
            None => {
                tracing::warn!(name, "Unknown color space, treating as rgb");
                ColorSpace::Rgb
            }
        }
    }

    /// Index of the hue component within [`ColorVector::components`].
    pub fn hue_index(self) -> Option<usize> {
        match self {
            ColorSpace::Hsl | ColorSpace::Hsv | ColorSpace::Hwb => Some(0),
            ColorSpace::Lch | ColorSpace::Oklch => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for ColorSpace {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ColorSpace> for String {
    fn from(space: ColorSpace) -> Self {
        space.name().to_string()
    }
}

/// A color expressed in one specific space.
///
/// Units:
/// - `Rgb`, `LinearRgb`, `WeightedRgb`, `Cmy`, `Cmyk`, `YCbCr`: unit range
/// - `Hsl`, `Hsv`, `Hwb`: hue in degrees, other components unit range
/// - `Lab`/`Lch`: L 0..=100; `Oklab`/`Oklch`: L 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorVector {
    Rgb { r: f64, g: f64, b: f64 },
    LinearRgb { r: f64, g: f64, b: f64 },
    WeightedRgb { r: f64, g: f64, b: f64 },
    Hsl { h: f64, s: f64, l: f64 },
    Hsv { h: f64, s: f64, v: f64 },
    Hwb { h: f64, w: f64, b: f64 },
    Cmy { c: f64, m: f64, y: f64 },
    Cmyk { c: f64, m: f64, y: f64, k: f64 },
    Lab(Lab),
    Lch(Lch),
    Oklab(Oklab),
    Oklch(Oklch),
    YCbCr { y: f64, cb: f64, cr: f64 },
}

impl ColorVector {
    pub fn space(&self) -> ColorSpace {
        match self {
            ColorVector::Rgb { .. } => ColorSpace::Rgb,
            ColorVector::LinearRgb { .. } => ColorSpace::LinearRgb,
            ColorVector::WeightedRgb { .. } => ColorSpace::WeightedRgb,
            ColorVector::Hsl { .. } => ColorSpace::Hsl,
            ColorVector::Hsv { .. } => ColorSpace::Hsv,
            ColorVector::Hwb { .. } => ColorSpace::Hwb,
            ColorVector::Cmy { .. } => ColorSpace::Cmy,
            ColorVector::Cmyk { .. } => ColorSpace::Cmyk,
            ColorVector::Lab(_) => ColorSpace::Lab,
            ColorVector::Lch(_) => ColorSpace::Lch,
            ColorVector::Oklab(_) => ColorSpace::Oklab,
            ColorVector::Oklch(_) => ColorSpace::Oklch,
            ColorVector::YCbCr { .. } => ColorSpace::YCbCr,
        }
    }

    /// Raw components in declaration order, padded with zeros.
    pub fn components(&self) -> [f64; 4] {
        match *self {
            ColorVector::Rgb { r, g, b }
            | ColorVector::LinearRgb { r, g, b }
            | ColorVector::WeightedRgb { r, g, b } => [r, g, b, 0.0],
            ColorVector::Hsl { h, s, l } => [h, s, l, 0.0],
            ColorVector::Hsv { h, s, v } => [h, s, v, 0.0],
            ColorVector::Hwb { h, w, b } => [h, w, b, 0.0],
            ColorVector::Cmy { c, m, y } => [c, m, y, 0.0],
            ColorVector::Cmyk { c, m, y, k } => [c, m, y, k],
            ColorVector::Lab(lab) => [lab.l, lab.a, lab.b, 0.0],
            ColorVector::Lch(lch) => [lch.l, lch.c, lch.h, 0.0],
            ColorVector::Oklab(lab) => [lab.l, lab.a, lab.b, 0.0],
            ColorVector::Oklch(lch) => [lch.l, lch.c, lch.h, 0.0],
            ColorVector::YCbCr { y, cb, cr } => [y, cb, cr, 0.0],
        }
    }

    /// Inverse of [`components`](Self::components).
    pub fn from_components(space: ColorSpace, c: [f64; 4]) -> Self {
        match space {
            ColorSpace::Rgb => ColorVector::Rgb { r: c[0], g: c[1], b: c[2] },
            ColorSpace::LinearRgb => ColorVector::LinearRgb { r: c[0], g: c[1], b: c[2] },
            ColorSpace::WeightedRgb => ColorVector::WeightedRgb { r: c[0], g: c[1], b: c[2] },
            ColorSpace::Hsl => ColorVector::Hsl { h: c[0], s: c[1], l: c[2] },
            ColorSpace::Hsv => ColorVector::Hsv { h: c[0], s: c[1], v: c[2] },
            ColorSpace::Hwb => ColorVector::Hwb { h: c[0], w: c[1], b: c[2] },
            ColorSpace::Cmy => ColorVector::Cmy { c: c[0], m: c[1], y: c[2] },
            ColorSpace::Cmyk => ColorVector::Cmyk { c: c[0], m: c[1], y: c[2], k: c[3] },
            ColorSpace::Lab => ColorVector::Lab(Lab::new(c[0], c[1], c[2])),
            ColorSpace::Lch => ColorVector::Lch(Lch { l: c[0], c: c[1], h: c[2] }),
            ColorSpace::Oklab => ColorVector::Oklab(Oklab::new(c[0], c[1], c[2])),
            ColorSpace::Oklch => ColorVector::Oklch(Oklch::new(c[0], c[1], c[2])),
            ColorSpace::YCbCr => ColorVector::YCbCr { y: c[0], cb: c[1], cr: c[2] },
        }
    }
}

/// Convert gamma-encoded unit RGB into `space`.
pub fn to_vector(rgb: [f64; 3], space: ColorSpace) -> ColorVector {
    let [r, g, b] = rgb;
    match space {
        ColorSpace::Rgb => ColorVector::Rgb { r, g, b },
        ColorSpace::LinearRgb => {
            let [r, g, b] = rgb.map(srgb_to_linear);
            ColorVector::LinearRgb { r, g, b }
        }
        ColorSpace::WeightedRgb => ColorVector::WeightedRgb {
            r: r * WEIGHTED_RGB[0],
            g: g * WEIGHTED_RGB[1],
            b: b * WEIGHTED_RGB[2],
        },
        ColorSpace::Hsl => {
            let (h, max, min) = hue_max_min(rgb);
            let l = (max + min) / 2.0;
            let d = max - min;
            let denom = 1.0 - (2.0 * l - 1.0).abs();
            let s = if d <= 0.0 || denom <= 0.0 { 0.0 } else { d / denom };
            ColorVector::Hsl { h, s, l }
        }
        ColorSpace::Hsv => {
            let (h, max, min) = hue_max_min(rgb);
            let s = if max <= 0.0 { 0.0 } else { (max - min) / max };
            ColorVector::Hsv { h, s, v: max }
        }
        ColorSpace::Hwb => {
            let (h, max, min) = hue_max_min(rgb);
            ColorVector::Hwb { h, w: min, b: 1.0 - max }
        }
        ColorSpace::Cmy => ColorVector::Cmy {
            c: 1.0 - r,
            m: 1.0 - g,
            y: 1.0 - b,
        },
        ColorSpace::Cmyk => {
            let k = 1.0 - r.max(g).max(b);
            if k >= 1.0 {
                ColorVector::Cmyk { c: 0.0, m: 0.0, y: 0.0, k: 1.0 }
            } else {
                let inv = 1.0 - k;
                ColorVector::Cmyk {
                    c: (1.0 - r - k) / inv,
                    m: (1.0 - g - k) / inv,
                    y: (1.0 - b - k) / inv,
                    k,
                }
            }
        }
        ColorSpace::Lab => ColorVector::Lab(Lab::from_srgb_unit(rgb)),
        ColorSpace::Lch => ColorVector::Lch(Lch::from(Lab::from_srgb_unit(rgb))),
        ColorSpace::Oklab => ColorVector::Oklab(Oklab::from_srgb_unit(rgb)),
        ColorSpace::Oklch => ColorVector::Oklch(Oklch::from(Oklab::from_srgb_unit(rgb))),
        ColorSpace::YCbCr => {
            let y = 0.299 * r + 0.587 * g + 0.114 * b;
            ColorVector::YCbCr {
                y,
                cb: 0.5 + (b - y) / 1.772,
                cr: 0.5 + (r - y) / 1.402,
            }
        }
    }
}

/// Convert a vector back to gamma-encoded unit RGB. Not clamped.
pub fn to_rgb_unit(vector: &ColorVector) -> [f64; 3] {
    match *vector {
        ColorVector::Rgb { r, g, b } => [r, g, b],
        ColorVector::LinearRgb { r, g, b } => [r, g, b].map(linear_to_srgb),
        ColorVector::WeightedRgb { r, g, b } => [
            r / WEIGHTED_RGB[0],
            g / WEIGHTED_RGB[1],
            b / WEIGHTED_RGB[2],
        ],
        ColorVector::Hsl { h, s, l } => {
            let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
            chroma_hue_to_rgb(h, c, l - c / 2.0)
        }
        ColorVector::Hsv { h, s, v } => {
            let c = v * s;
            chroma_hue_to_rgb(h, c, v - c)
        }
        ColorVector::Hwb { h, w, b } => {
            if w + b >= 1.0 {
                let gray = w / (w + b);
                return [gray, gray, gray];
            }
            let v = 1.0 - b;
            let s = 1.0 - w / v;
            let c = v * s;
            chroma_hue_to_rgb(h, c, v - c)
        }
        ColorVector::Cmy { c, m, y } => [1.0 - c, 1.0 - m, 1.0 - y],
        ColorVector::Cmyk { c, m, y, k } => {
            [(1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k)]
        }
        ColorVector::Lab(lab) => lab.to_srgb_unit(),
        ColorVector::Lch(lch) => Lab::from(lch).to_srgb_unit(),
        ColorVector::Oklab(lab) => lab.to_srgb_unit(),
        ColorVector::Oklch(lch) => Oklab::from(lch).to_srgb_unit(),
        ColorVector::YCbCr { y, cb, cr } => {
            let r = y + 1.402 * (cr - 0.5);
            let b = y + 1.772 * (cb - 0.5);
            let g = (y - 0.299 * r - 0.114 * b) / 0.587;
            [r, g, b]
        }
    }
}

/// Interpolate between two angles in degrees along the shorter arc.
///
/// The result is wrapped to 0.0..360.0.
#[inline]
pub fn lerp_angle(a: f64, b: f64, t: f64) -> f64 {
    let delta = (b - a + 540.0).rem_euclid(360.0) - 180.0;
    (a + delta * t).rem_euclid(360.0)
}

/// Mix two vectors, `t = 0` giving `a` and `t = 1` giving `b`.
///
/// `b` is converted into `a`'s space first when the spaces differ. Hue
/// components go through [`lerp_angle`].
pub fn mix_vectors(a: &ColorVector, b: &ColorVector, t: f64) -> ColorVector {
    let space = a.space();
    let b = if b.space() == space {
        *b
    } else {
        to_vector(to_rgb_unit(b), space)
    };
    let ca = a.components();
    let cb = b.components();
    let hue = space.hue_index();
    let mut out = [0.0; 4];
    for i in 0..4 {
        out[i] = if Some(i) == hue {
            lerp_angle(ca[i], cb[i], t)
        } else {
            ca[i] + (cb[i] - ca[i]) * t
        };
    }
    ColorVector::from_components(space, out)
}

/// Hue in degrees plus the max and min channel.
fn hue_max_min(rgb: [f64; 3]) -> (f64, f64, f64) {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;
    let h = if d <= 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / d).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / d + 2.0)
    } else {
        60.0 * ((r - g) / d + 4.0)
    };
    (h.rem_euclid(360.0), max, min)
}

/// Shared tail of the HSL/HSV/HWB inverse conversions.
fn chroma_hue_to_rgb(h: f64, c: f64, m: f64) -> [f64; 3] {
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}
