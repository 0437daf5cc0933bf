//! OKLCH gamut fitting
//!
//! Out-of-range colors keep their OKLCH lightness and hue while chroma is
//! shrunk geometrically until the color lands inside sRGB or the step budget
//! runs out. The last attempt is returned either way.

use crate::color::{Oklab, Oklch};

/// Chroma multiplier per step.
pub const CHROMA_SHRINK: f64 = 0.96;
/// Maximum number of shrink steps.
pub const MAX_FIT_STEPS: usize = 48;

const RANGE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamutFit {
    /// Unit RGB, not clamped
    pub rgb: [f64; 3],
    pub in_gamut: bool,
    /// Number of shrink steps taken
    pub steps: usize,
}

/// Pull an out-of-range unit RGB color back toward the sRGB gamut.
pub fn fit_to_gamut(rgb: [f64; 3]) -> GamutFit {
    if in_unit_range(rgb) {
        return GamutFit {
            rgb,
            in_gamut: true,
            steps: 0,
        };
    }
    if rgb.iter().any(|c| !c.is_finite()) {
        return GamutFit {
            rgb,
            in_gamut: false,
            steps: 0,
        };
    }

    let mut lch = Oklch::from(Oklab::from_srgb_unit(rgb));
    let mut best = rgb;
    for step in 1..=MAX_FIT_STEPS {
        lch = lch.scale_chroma(CHROMA_SHRINK);
        let (candidate, in_gamut) = lch.to_srgb_unit_checked();
        best = candidate;
        if in_gamut {
            return GamutFit {
                rgb: candidate,
                in_gamut: true,
                steps: step,
            };
        }
    }
    tracing::trace!(?rgb, ?best, "Gamut fit budget exhausted");
    GamutFit {
        rgb: best,
        in_gamut: false,
        steps: MAX_FIT_STEPS,
    }
}

fn in_unit_range(rgb: [f64; 3]) -> bool {
    rgb.iter()
        .all(|&c| c >= -RANGE_EPSILON && c <= 1.0 + RANGE_EPSILON)
}
