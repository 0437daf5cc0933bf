//! CIE L*a*b* (D65) and its polar form L*C*h

use super::transfer::{linear_to_srgb, srgb_to_linear};

/// D65 reference white
const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;

/// CIE ε = 216/24389
const EPSILON: f64 = 216.0 / 24389.0;
/// CIE κ = 24389/27
const KAPPA: f64 = 24389.0 / 27.0;

/// A color in CIE L*a*b*, D65 white point.
///
/// `l` is 0..=100, `a`/`b` roughly -128..=128 for sRGB colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Convert from gamma-encoded unit RGB.
    pub fn from_srgb_unit(rgb: [f64; 3]) -> Self {
        let [r, g, b] = rgb.map(srgb_to_linear);
        let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
        let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
        let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Convert to gamma-encoded unit RGB. Not clamped.
    pub fn to_srgb_unit(self) -> [f64; 3] {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;

        let x = lab_f_inv(fx) * WHITE_X;
        let y = if self.l > KAPPA * EPSILON {
            fy * fy * fy
        } else {
            self.l / KAPPA
        } * WHITE_Y;
        let z = lab_f_inv(fz) * WHITE_Z;

        let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
        let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
        let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;
        [r, g, b].map(linear_to_srgb)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

fn lab_f_inv(f: f64) -> f64 {
    let f3 = f * f * f;
    if f3 > EPSILON {
        f3
    } else {
        (116.0 * f - 16.0) / KAPPA
    }
}

/// CIE L*C*h: polar Lab with hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl From<Lab> for Lch {
    fn from(lab: Lab) -> Self {
        Lch {
            l: lab.l,
            c: (lab.a * lab.a + lab.b * lab.b).sqrt(),
            h: lab.b.atan2(lab.a).to_degrees().rem_euclid(360.0),
        }
    }
}

impl From<Lch> for Lab {
    fn from(lch: Lch) -> Self {
        let h = lch.h.to_radians();
        Lab::new(lch.l, lch.c * h.cos(), lch.c * h.sin())
    }
}
