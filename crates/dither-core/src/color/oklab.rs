//! Oklab perceptual color space and its polar form Oklch
//!
//! Oklab is used for perceptual distances (similarity metric, default
//! quantization distance) and Oklch for gamut fitting, where chroma is shrunk
//! while lightness and hue are held.
//!
//! # References
//!
//! Björn Ottosson, "A perceptual color space for image processing"
//! <https://bottosson.github.io/posts/oklab/>

use super::transfer::{linear_to_srgb, srgb_to_linear};

/// Tolerance for deciding whether a converted channel is inside 0..=1.
const GAMUT_EPSILON: f64 = 1e-6;

/// A color in Oklab perceptual color space.
///
/// # Components
///
/// - `l`: Lightness (0.0 = black, 1.0 = white for in-gamut colors)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
///
/// Values are not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Convert from linear-light RGB (unit range).
    ///
    /// Uses the updated 2021-01-25 matrices from Björn Ottosson.
    pub fn from_linear(rgb: [f64; 3]) -> Self {
        let [r, g, b] = rgb;
        // Step 1: Linear sRGB to LMS (M1 matrix)
        let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
        let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
        let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

        // Step 2: Cube root (nonlinearity)
        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        // Step 3: LMS to Lab (M2 matrix)
        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }

    /// Convert to linear-light RGB. The result is not clamped.
    pub fn to_linear(self) -> [f64; 3] {
        // Step 1: Lab to LMS (inverse M2)
        let l_ = self.l + 0.3963377774 * self.a + 0.2158037573 * self.b;
        let m_ = self.l - 0.1055613458 * self.a - 0.0638541728 * self.b;
        let s_ = self.l - 0.0894841775 * self.a - 1.2914855480 * self.b;

        // Step 2: Cube (reverse nonlinearity)
        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        // Step 3: LMS to linear sRGB (inverse M1)
        [
            4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
            -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
            -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
        ]
    }

    /// Convert from gamma-encoded unit RGB.
    pub fn from_srgb_unit(rgb: [f64; 3]) -> Self {
        Self::from_linear(rgb.map(srgb_to_linear))
    }

    /// Convert to gamma-encoded unit RGB. Not clamped.
    pub fn to_srgb_unit(self) -> [f64; 3] {
        self.to_linear().map(linear_to_srgb)
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Oklab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    #[inline]
    pub fn distance(self, other: Oklab) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Oklch: polar form of Oklab with hue in degrees.
///
/// For achromatic colors hue is undefined; the conversion yields whatever
/// `atan2(0, 0)` returns (0°), which is harmless at zero chroma.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Lightness, same as Oklab L
    pub l: f64,
    /// Chroma, 0.0 = achromatic, ~0.4 for the most vivid sRGB colors
    pub c: f64,
    /// Hue in degrees, 0.0..360.0
    pub h: f64,
}

impl Oklch {
    #[inline]
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Convert to gamma-encoded unit RGB, reporting whether every channel
    /// landed inside 0..=1.
    ///
    /// The channels are returned unclamped either way, so callers doing gamut
    /// fitting can see how far outside the result lies.
    pub fn to_srgb_unit_checked(self) -> ([f64; 3], bool) {
        let linear = Oklab::from(self).to_linear();
        let in_gamut = linear
            .iter()
            .all(|&c| c >= -GAMUT_EPSILON && c <= 1.0 + GAMUT_EPSILON);
        (linear.map(linear_to_srgb), in_gamut)
    }

    /// Same lightness and hue, chroma multiplied by `factor`.
    #[inline]
    pub fn scale_chroma(self, factor: f64) -> Self {
        Self::new(self.l, (self.c * factor).max(0.0), self.h)
    }
}

impl From<Oklab> for Oklch {
    fn from(lab: Oklab) -> Self {
        let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
        let h = lab.b.atan2(lab.a).to_degrees().rem_euclid(360.0);
        Self { l: lab.l, c, h }
    }
}

impl From<Oklch> for Oklab {
    fn from(lch: Oklch) -> Self {
        let h = lch.h.to_radians();
        Self::new(lch.l, lch.c * h.cos(), lch.c * h.sin())
    }
}
