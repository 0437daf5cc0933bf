//! Per-pixel dither strength modulation from palette distances.
//!
//! Two independent terms scale the effective dither strength:
//!
//! - **error**: how far the pixel is from its nearest palette entry,
//!   normalized by the palette's black-to-white span
//! - **ambiguity**: how close the nearest and second-nearest entries are,
//!   `nearest / second` (1.0 when the pixel sits exactly between two)
//!
//! Each term is shaped as `bias + (1 - bias) * value^exponent` and blended in
//! from 1.0 by its strength, so a strength of 0 leaves dithering untouched.

use serde::{Deserialize, Serialize};

use super::palette::DistanceSummary;

/// Shaping of one modulation term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulationTerm {
    /// 0.0 disables the term, 1.0 applies it fully
    pub strength: f64,
    pub exponent: f64,
    /// Floor of the shaped term, so fully "certain" pixels still get some dither
    pub bias: f64,
}

impl Default for ModulationTerm {
    fn default() -> Self {
        Self {
            strength: 0.0,
            exponent: 1.0,
            bias: 0.0,
        }
    }
}

impl ModulationTerm {
    fn is_active(&self) -> bool {
        self.strength.is_finite() && self.strength > 0.0
    }

    /// `bias + (1 - bias) * value^exponent`, value clamped to 0..=1.
    pub fn shape(&self, value: f64) -> f64 {
        let value = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let exponent = if self.exponent.is_finite() && self.exponent > 0.0 {
            self.exponent
        } else {
            1.0
        };
        let bias = if self.bias.is_finite() {
            self.bias.clamp(0.0, 1.0)
        } else {
            0.0
        };
        bias + (1.0 - bias) * value.powf(exponent)
    }

    /// Blend from 1.0 toward the shaped value by strength.
    fn factor(&self, value: f64) -> f64 {
        if !self.is_active() {
            return 1.0;
        }
        let strength = self.strength.min(1.0);
        1.0 + strength * (self.shape(value) - 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulationOptions {
    pub error: ModulationTerm,
    pub ambiguity: ModulationTerm,
}

impl ModulationOptions {
    pub fn is_active(&self) -> bool {
        self.error.is_active() || self.ambiguity.is_active()
    }

    /// Normalized palette error in 0..=1.
    pub fn error_value(summary: &DistanceSummary, reference_scale: f64) -> f64 {
        if reference_scale > 0.0 {
            (summary.nearest_distance / reference_scale).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// `nearest / second`, 0.0 without a second entry.
    pub fn ambiguity_value(summary: &DistanceSummary) -> f64 {
        match summary.second_nearest_distance {
            Some(second) if second > 0.0 => (summary.nearest_distance / second).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Strength multiplier in 0..=1 for a pixel with the given distances.
    pub fn factor(&self, summary: &DistanceSummary, reference_scale: f64) -> f64 {
        self.error.factor(Self::error_value(summary, reference_scale))
            * self.ambiguity.factor(Self::ambiguity_value(summary))
    }
}

/// Strength multiplier for a pixel; 1.0 when modulation is off.
#[inline]
pub fn modulation_factor(
    options: &ModulationOptions,
    summary: &DistanceSummary,
    reference_scale: f64,
) -> f64 {
    if options.is_active() {
        options.factor(summary, reference_scale)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(nearest: f64, second: Option<f64>) -> DistanceSummary {
        DistanceSummary {
            nearest_index: 0,
            nearest_distance: nearest,
            second_nearest_distance: second,
        }
    }

    #[test]
    fn test_inactive_options_leave_strength_alone() {
        let options = ModulationOptions::default();
        assert!(!options.is_active());
        assert_eq!(options.factor(&summary(0.3, Some(0.4)), 1.0), 1.0);
    }

    #[test]
    fn test_error_term() {
        let options = ModulationOptions {
            error: ModulationTerm {
                strength: 1.0,
                exponent: 2.0,
                bias: 0.0,
            },
            ..Default::default()
        };
        let f = options.factor(&summary(0.5, None), 1.0);
        assert!((f - 0.25).abs() < 1e-12);
        // On a palette color: no error, no dither
        assert_eq!(options.factor(&summary(0.0, None), 1.0), 0.0);
    }

    #[test]
    fn test_ambiguity_term_with_bias_and_half_strength() {
        let options = ModulationOptions {
            ambiguity: ModulationTerm {
                strength: 0.5,
                exponent: 1.0,
                bias: 0.2,
            },
            ..Default::default()
        };
        // Exactly between two entries: shaped term 1.0, factor 1.0
        assert!((options.factor(&summary(0.3, Some(0.3)), 1.0) - 1.0).abs() < 1e-12);
        // ratio 0 -> shaped 0.2 -> blended halfway from 1.0 -> 0.6
        assert!((options.factor(&summary(0.0, Some(0.3)), 1.0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_parameters() {
        let term = ModulationTerm {
            strength: 1.0,
            exponent: f64::NAN,
            bias: -3.0,
        };
        assert!((term.shape(0.4) - 0.4).abs() < 1e-12);
        assert_eq!(term.shape(f64::INFINITY), 1.0);
    }
}
