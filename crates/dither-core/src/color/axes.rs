//! Space-agnostic axis projections
//!
//! An [`AxisTriple`] maps any [`ColorVector`] onto three roughly unit-range
//! axes so statistics (mean, covariance, std-dev) can be computed the same way
//! whichever space is active. Hue is wrapped into 0..1 and then treated as a
//! linear axis; there is no circular-mean correction.
//!
//! Distance coordinates are a separate projection used for nearest-color
//! search: polar spaces are unrolled into Cartesian form so Euclidean
//! distance does not jump at the 0°/360° seam.

use super::lab::{Lab, Lch};
use super::oklab::{Oklab, Oklch};
use super::space::{to_rgb_unit, to_vector, ColorSpace, ColorVector};

/// Three normalized axes of a color in some space.
pub type AxisTriple = [f64; 3];

/// Fixed normalizer for OKLCH chroma.
pub const OKLCH_CHROMA_SCALE: f64 = 0.4;
/// Fixed normalizer for CIE LCh chroma.
const LCH_CHROMA_SCALE: f64 = 150.0;
/// Lab/OKLab opponent axes are shifted by +0.5 after scaling.
const LAB_AB_SCALE: f64 = 256.0;

#[inline]
fn wrap_unit(v: f64) -> f64 {
    v.rem_euclid(1.0)
}

/// Project a vector onto its normalized axes.
pub fn to_axes(vector: &ColorVector) -> AxisTriple {
    match *vector {
        ColorVector::Rgb { r, g, b }
        | ColorVector::LinearRgb { r, g, b }
        | ColorVector::WeightedRgb { r, g, b } => [r, g, b],
        ColorVector::Hsl { h, s, l } => [wrap_unit(h / 360.0), s, l],
        ColorVector::Hsv { h, s, v } => [wrap_unit(h / 360.0), s, v],
        ColorVector::Hwb { h, w, b } => [wrap_unit(h / 360.0), w, b],
        ColorVector::Cmy { c, m, y } => [c, m, y],
        // Composite CMY ink coverage; K folds back in on the way out
        ColorVector::Cmyk { c, m, y, k } => {
            [c * (1.0 - k) + k, m * (1.0 - k) + k, y * (1.0 - k) + k]
        }
        ColorVector::Lab(lab) => [
            lab.l / 100.0,
            lab.a / LAB_AB_SCALE + 0.5,
            lab.b / LAB_AB_SCALE + 0.5,
        ],
        ColorVector::Lch(lch) => [
            lch.l / 100.0,
            lch.c / LCH_CHROMA_SCALE,
            wrap_unit(lch.h / 360.0),
        ],
        ColorVector::Oklab(lab) => [lab.l, lab.a + 0.5, lab.b + 0.5],
        ColorVector::Oklch(lch) => [
            lch.l,
            lch.c / OKLCH_CHROMA_SCALE,
            wrap_unit(lch.h / 360.0),
        ],
        ColorVector::YCbCr { y, cb, cr } => [y, cb, cr],
    }
}

/// Inverse of [`to_axes`] for the given space.
pub fn from_axes(space: ColorSpace, t: AxisTriple) -> ColorVector {
    match space {
        ColorSpace::Rgb
        | ColorSpace::LinearRgb
        | ColorSpace::WeightedRgb
        | ColorSpace::Cmy
        | ColorSpace::YCbCr => ColorVector::from_components(space, [t[0], t[1], t[2], 0.0]),
        ColorSpace::Hsl | ColorSpace::Hsv | ColorSpace::Hwb => ColorVector::from_components(
            space,
            [wrap_unit(t[0]) * 360.0, t[1], t[2], 0.0],
        ),
        ColorSpace::Cmyk => {
            let rgb = to_rgb_unit(&ColorVector::Cmy { c: t[0], m: t[1], y: t[2] });
            to_vector(rgb, ColorSpace::Cmyk)
        }
        ColorSpace::Lab => ColorVector::Lab(Lab::new(
            t[0] * 100.0,
            (t[1] - 0.5) * LAB_AB_SCALE,
            (t[2] - 0.5) * LAB_AB_SCALE,
        )),
        ColorSpace::Lch => ColorVector::Lch(Lch {
            l: t[0] * 100.0,
            c: t[1] * LCH_CHROMA_SCALE,
            h: wrap_unit(t[2]) * 360.0,
        }),
        ColorSpace::Oklab => ColorVector::Oklab(Oklab::new(t[0], t[1] - 0.5, t[2] - 0.5)),
        ColorSpace::Oklch => ColorVector::Oklch(Oklch::new(
            t[0],
            t[1] * OKLCH_CHROMA_SCALE,
            wrap_unit(t[2]) * 360.0,
        )),
    }
}

/// Project unit RGB straight onto the axes of `space`.
#[inline]
pub fn rgb_to_axes(rgb: [f64; 3], space: ColorSpace) -> AxisTriple {
    to_axes(&to_vector(rgb, space))
}

/// Unit RGB back from axes of `space`. Not clamped.
#[inline]
pub fn axes_to_rgb(t: AxisTriple, space: ColorSpace) -> [f64; 3] {
    to_rgb_unit(&from_axes(space, t))
}

/// Coordinates for Euclidean nearest-color search.
///
/// Native units for Lab/OKLab (so RGB distance is ΔRGB and Lab distance is
/// ΔE76); hue-bearing spaces are unrolled with their chroma-like component as
/// the radius. CMYK keeps all four inks.
pub fn distance_coords(vector: &ColorVector) -> [f64; 4] {
    fn unroll(radius: f64, hue_deg: f64) -> (f64, f64) {
        let h = hue_deg.to_radians();
        (radius * h.cos(), radius * h.sin())
    }
    match *vector {
        ColorVector::Hsl { h, s, l } => {
            let (x, y) = unroll(s, h);
            [x, y, l, 0.0]
        }
        ColorVector::Hsv { h, s, v } => {
            let (x, y) = unroll(s, h);
            [x, y, v, 0.0]
        }
        ColorVector::Hwb { h, w, b } => {
            let (x, y) = unroll((1.0 - w - b).max(0.0), h);
            [x, y, w, b]
        }
        ColorVector::Lch(lch) => {
            let lab = Lab::from(lch);
            [lab.l, lab.a, lab.b, 0.0]
        }
        ColorVector::Oklch(lch) => {
            let lab = Oklab::from(lch);
            [lab.l, lab.a, lab.b, 0.0]
        }
        _ => vector.components(),
    }
}

/// Distance coordinates of unit RGB in `space`.
#[inline]
pub fn rgb_distance_coords(rgb: [f64; 3], space: ColorSpace) -> [f64; 4] {
    distance_coords(&to_vector(rgb, space))
}

/// Squared Euclidean distance between two coordinate tuples.
#[inline]
pub fn coords_distance_squared(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_round_trip_every_space() {
        let samples = [[0.2, 0.5, 0.7], [0.9, 0.1, 0.3], [0.6, 0.6, 0.1]];
        for space in ColorSpace::ALL {
            for rgb in samples {
                let back = axes_to_rgb(rgb_to_axes(rgb, space), space);
                for c in 0..3 {
                    assert!(
                        (rgb[c] - back[c]).abs() < 1e-5,
                        "{space}: {rgb:?} -> {back:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_hue_axis_wraps_into_unit_interval() {
        let t = to_axes(&ColorVector::Hsl { h: 370.0, s: 0.5, l: 0.5 });
        assert!((t[0] - 10.0 / 360.0).abs() < 1e-12);
        let t = to_axes(&ColorVector::Oklch(Oklch::new(0.5, 0.2, -90.0)));
        assert!((t[2] - 0.75).abs() < 1e-12);
        assert!((t[1] - 0.5).abs() < 1e-12, "chroma normalized by 0.4");
    }

    #[test]
    fn test_unrolled_hue_has_no_seam() {
        let a = distance_coords(&ColorVector::Hsl { h: 359.0, s: 1.0, l: 0.5 });
        let b = distance_coords(&ColorVector::Hsl { h: 1.0, s: 1.0, l: 0.5 });
        assert!(coords_distance_squared(&a, &b) < 0.01);
    }

    #[test]
    fn test_rgb_distance_is_unit_scaled() {
        let black = rgb_distance_coords([0.0, 0.0, 0.0], ColorSpace::Rgb);
        let white = rgb_distance_coords([1.0, 1.0, 1.0], ColorSpace::Rgb);
        assert!((coords_distance_squared(&black, &white) - 3.0).abs() < 1e-12);
    }
}
