//! Statistical gamut alignment
//!
//! A [`GamutTransform`] maps the source color distribution onto the
//! palette's: it recenters on the palette mean, rescales each axis toward
//! the palette spread and rotates the source's principal axes onto the
//! palette's. Every component is blended in from identity by its strength.

use serde::{Deserialize, Serialize};

use crate::color::{axes_to_rgb, rgb_to_axes, AxisTriple, ColorSpace, Rgb};
use crate::math::{AxisStats, Matrix3};

/// Components closer than this to identity do not activate the transform.
pub const ACTIVE_THRESHOLD: f64 = 1e-4;
/// Source spreads below this are treated as flat (no scaling on that axis).
const MIN_STD_DEV: f64 = 1e-6;

/// Slider strengths, each clamped to 0..=1 when used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamutStrengths {
    pub overall: f64,
    pub translation: f64,
    pub rotation: f64,
    /// Per-axis scale strengths
    pub scale: [f64; 3],
}

impl Default for GamutStrengths {
    fn default() -> Self {
        Self {
            overall: 1.0,
            translation: 1.0,
            rotation: 1.0,
            scale: [1.0; 3],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamutTransform {
    pub space: ColorSpace,
    pub source_mean: AxisTriple,
    pub desired_mean: AxisTriple,
    pub scale: AxisTriple,
    pub rotation: Matrix3,
    pub is_active: bool,
}

impl GamutTransform {
    /// The transform that changes nothing.
    pub fn identity(space: ColorSpace) -> Self {
        Self {
            space,
            source_mean: [0.0; 3],
            desired_mean: [0.0; 3],
            scale: [1.0; 3],
            rotation: Matrix3::IDENTITY,
            is_active: false,
        }
    }

    /// Derive the transform taking `source` statistics toward `palette`
    /// statistics, both measured in `space`.
    ///
    /// Rotation needs at least three samples on both sides; otherwise only
    /// translation and scale are applied.
    pub fn derive(
        source: &AxisStats,
        palette: &AxisStats,
        space: ColorSpace,
        strengths: &GamutStrengths,
    ) -> Self {
        if source.is_empty() || palette.is_empty() {
            tracing::debug!("Gamut transform skipped, missing statistics");
            return Self::identity(space);
        }

        let overall = unit(strengths.overall);
        let translation = unit(overall * unit(strengths.translation));

        let mut desired_mean = source.mean;
        let mut scale = [1.0; 3];
        for axis in 0..3 {
            desired_mean[axis] += translation * (palette.mean[axis] - source.mean[axis]);

            let ratio = if source.std_dev[axis] > MIN_STD_DEV {
                palette.std_dev[axis] / source.std_dev[axis]
            } else {
                1.0
            };
            let s = unit(overall * unit(strengths.scale[axis]));
            scale[axis] = 1.0 + s * (ratio - 1.0);
        }

        let rotation_strength = unit(overall * unit(strengths.rotation));
        let rotation = if rotation_strength > 0.0 {
            match (palette.principal_basis(), source.principal_basis()) {
                (Some(palette_basis), Some(source_basis)) => {
                    (palette_basis * source_basis.transpose()).blend_rotation(rotation_strength)
                }
                _ => {
                    tracing::debug!(
                        source_samples = source.len(),
                        palette_samples = palette.len(),
                        "Too few samples for rotation alignment"
                    );
                    Matrix3::IDENTITY
                }
            }
        } else {
            Matrix3::IDENTITY
        };

        let moved = (0..3).any(|i| (desired_mean[i] - source.mean[i]).abs() > ACTIVE_THRESHOLD);
        let scaled = scale.iter().any(|s| (s - 1.0).abs() > ACTIVE_THRESHOLD);
        let rotated = !rotation.is_identity(ACTIVE_THRESHOLD);

        let transform = Self {
            space,
            source_mean: source.mean,
            desired_mean,
            scale,
            rotation,
            is_active: moved || scaled || rotated,
        };
        tracing::debug!(
            %space,
            active = transform.is_active,
            moved,
            scaled,
            rotated,
            "Derived gamut transform"
        );
        transform
    }

    /// Center on the source mean, rotate, scale, then add the desired mean.
    pub fn apply_axes(&self, t: AxisTriple) -> AxisTriple {
        if !self.is_active {
            return t;
        }
        let centered = [
            t[0] - self.source_mean[0],
            t[1] - self.source_mean[1],
            t[2] - self.source_mean[2],
        ];
        let rotated = self.rotation.mul_vec(centered);
        [
            rotated[0] * self.scale[0] + self.desired_mean[0],
            rotated[1] * self.scale[1] + self.desired_mean[1],
            rotated[2] * self.scale[2] + self.desired_mean[2],
        ]
    }

    /// Transform a pipeline color through the transform's space. The result
    /// may leave the displayable range.
    pub fn apply(&self, rgb: Rgb) -> Rgb {
        if !self.is_active {
            return rgb;
        }
        let axes = rgb_to_axes(rgb.to_unit(), self.space);
        Rgb::from_unit(axes_to_rgb(self.apply_axes(axes), self.space))
    }
}

fn unit(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stats(samples: &[[f64; 3]]) -> AxisStats {
        AxisStats::from_samples(samples.to_vec())
    }

    fn spread() -> AxisStats {
        stats(&[
            [0.1, 0.2, 0.3],
            [0.5, 0.4, 0.2],
            [0.9, 0.7, 0.6],
            [0.3, 0.9, 0.1],
        ])
    }

    #[test]
    fn test_identical_statistics_are_inactive() {
        let s = spread();
        let t = GamutTransform::derive(&s, &s, ColorSpace::Oklab, &GamutStrengths::default());
        assert!(!t.is_active);
        let c = Rgb::new(12.0, 200.0, 77.0);
        assert_eq!(t.apply(c), c);
    }

    #[test]
    fn test_translation_only() {
        let source = stats(&[[0.2, 0.2, 0.2], [0.4, 0.4, 0.4]]);
        let palette = stats(&[[0.5, 0.5, 0.5], [0.7, 0.7, 0.7]]);
        let strengths = GamutStrengths {
            translation: 0.5,
            ..Default::default()
        };
        let t = GamutTransform::derive(&source, &palette, ColorSpace::Rgb, &strengths);
        assert!(t.is_active);
        assert_eq!(t.rotation, Matrix3::IDENTITY, "two samples cannot rotate");
        for axis in 0..3 {
            assert!((t.desired_mean[axis] - 0.45).abs() < 1e-12);
            assert!((t.scale[axis] - 1.0).abs() < 1e-12);
        }
        let out = t.apply_axes([0.3, 0.3, 0.3]);
        assert!((out[0] - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_scale_blends_from_identity() {
        let source = stats(&[[0.4, 0.5, 0.5], [0.6, 0.5, 0.5]]);
        let palette = stats(&[[0.2, 0.5, 0.5], [0.8, 0.5, 0.5]]);
        let strengths = GamutStrengths {
            overall: 0.5,
            ..Default::default()
        };
        let t = GamutTransform::derive(&source, &palette, ColorSpace::Rgb, &strengths);
        // ratio 3, strength 0.5 -> 2
        assert!((t.scale[0] - 2.0).abs() < 1e-12);
        // flat source axis: no scaling
        assert_eq!(t.scale[1], 1.0);
    }

    #[test]
    fn test_zero_overall_strength_is_inactive() {
        let source = spread();
        let palette = stats(&[[0.0; 3], [1.0; 3], [0.2, 0.8, 0.5]]);
        let strengths = GamutStrengths {
            overall: 0.0,
            ..Default::default()
        };
        let t = GamutTransform::derive(&source, &palette, ColorSpace::Lab, &strengths);
        assert!(!t.is_active);
    }

    #[test]
    fn test_rotation_aligns_principal_axes() {
        // Source spread along axis 0, palette along axis 1
        let source = stats(&[
            [0.0, 0.5, 0.5],
            [0.5, 0.52, 0.5],
            [1.0, 0.5, 0.49],
            [0.25, 0.49, 0.5],
        ]);
        let palette = stats(&[
            [0.5, 0.0, 0.5],
            [0.52, 0.5, 0.5],
            [0.5, 1.0, 0.49],
            [0.49, 0.25, 0.5],
        ]);
        let strengths = GamutStrengths {
            translation: 0.0,
            scale: [0.0; 3],
            ..Default::default()
        };
        let t = GamutTransform::derive(&source, &palette, ColorSpace::Rgb, &strengths);
        assert!(t.is_active);
        assert!((t.rotation.determinant() - 1.0).abs() < 1e-9);
        let moved = t.rotation.mul_vec([1.0, 0.0, 0.0]);
        assert!(moved[1].abs() > 0.9, "principal axis should map onto axis 1: {moved:?}");
    }
}
