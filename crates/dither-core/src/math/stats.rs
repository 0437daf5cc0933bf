//! Mean, spread and principal axes of a color distribution
//!
//! Samples are [`AxisTriple`]s, so hue-bearing spaces contribute their hue
//! as a plain linear 0..1 axis. Averaging across the 0/1 seam is not
//! corrected for.

use super::matrix3::Matrix3;
use crate::color::AxisTriple;

/// Minimum sample count for covariance and rotation alignment.
pub const MIN_COVARIANCE_SAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisStats {
    pub mean: AxisTriple,
    /// Population standard deviation per axis
    pub std_dev: AxisTriple,
    pub samples: Vec<AxisTriple>,
}

impl AxisStats {
    /// Statistics over `samples`. Non-finite samples are dropped.
    pub fn from_samples(samples: Vec<AxisTriple>) -> Self {
        let samples: Vec<AxisTriple> = samples
            .into_iter()
            .filter(|s| s.iter().all(|c| c.is_finite()))
            .collect();
        if samples.is_empty() {
            return Self::default();
        }

        let n = samples.len() as f64;
        let mut mean = [0.0; 3];
        for s in &samples {
            for axis in 0..3 {
                mean[axis] += s[axis];
            }
        }
        let mean = mean.map(|m| m / n);

        let mut var = [0.0; 3];
        for s in &samples {
            for axis in 0..3 {
                let d = s[axis] - mean[axis];
                var[axis] += d * d;
            }
        }

        Self {
            mean,
            std_dev: var.map(|v| (v / n).sqrt()),
            samples,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Population covariance, `None` with fewer than
    /// [`MIN_COVARIANCE_SAMPLES`] samples.
    pub fn covariance(&self) -> Option<Matrix3> {
        if self.samples.len() < MIN_COVARIANCE_SAMPLES {
            return None;
        }
        let n = self.samples.len() as f64;
        let mut cov = [[0.0; 3]; 3];
        for s in &self.samples {
            let d = [
                s[0] - self.mean[0],
                s[1] - self.mean[1],
                s[2] - self.mean[2],
            ];
            for i in 0..3 {
                for j in i..3 {
                    cov[i][j] += d[i] * d[j];
                }
            }
        }
        for i in 0..3 {
            for j in i..3 {
                cov[i][j] /= n;
                cov[j][i] = cov[i][j];
            }
        }
        Some(Matrix3(cov))
    }

    /// Right-handed eigenbasis of the covariance, principal axis first.
    pub fn principal_basis(&self) -> Option<Matrix3> {
        let cov = self.covariance()?;
        let eigen = cov.jacobi_eigen();
        if eigen.values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        Some(eigen.vectors.ensure_right_handed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mean_and_std_dev() {
        let stats = AxisStats::from_samples(vec![[0.0, 0.2, 1.0], [1.0, 0.2, 0.0]]);
        assert_eq!(stats.mean, [0.5, 0.2, 0.5]);
        assert!((stats.std_dev[0] - 0.5).abs() < 1e-12);
        assert!(stats.std_dev[1].abs() < 1e-12);
    }

    #[test]
    fn test_too_few_samples_have_no_covariance() {
        let stats = AxisStats::from_samples(vec![[0.0; 3], [1.0; 3]]);
        assert_eq!(stats.covariance(), None);
        assert_eq!(stats.principal_basis(), None);
        assert!(AxisStats::from_samples(Vec::new()).is_empty());
    }

    #[test]
    fn test_non_finite_samples_are_dropped() {
        let stats = AxisStats::from_samples(vec![[f64::NAN, 0.0, 0.0], [0.5, 0.5, 0.5]]);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.mean, [0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_principal_axis_follows_spread() {
        // Points spread along the second axis
        let samples = vec![
            [0.5, 0.0, 0.5],
            [0.5, 0.25, 0.51],
            [0.5, 0.5, 0.5],
            [0.5, 0.75, 0.49],
            [0.5, 1.0, 0.5],
        ];
        let basis = AxisStats::from_samples(samples).principal_basis().unwrap();
        assert!(basis.determinant() > 0.0);
        assert!((basis.column(0)[1].abs() - 1.0).abs() < 1e-3);
    }
}
