//! Perceptual similarity between two images
//!
//! Both images are blurred to model viewing distance, then compared per
//! pixel in a perceptual space. Dither noise averages out under the blur,
//! so only structural and color drift is scored.

use serde::{Deserialize, Serialize};

use super::blur::blur_rgb;
use crate::color::{Lab, Oklab};
use crate::output::PixelBuffer;

/// Mean delta at which the score drops to 50.
const SCORE_HALF_POINT: f64 = 0.05;

/// Space for per-pixel deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilaritySpace {
    #[default]
    Oklab,
    /// CIE Lab distance divided by 100 to match the OKLab scale
    Lab,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityOptions {
    /// Blur radius in pixels (Gaussian sigma)
    pub radius: f64,
    pub space: SimilaritySpace,
    /// Keep the per-pixel deltas for heatmaps
    pub keep_deltas: bool,
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self {
            radius: 1.5,
            space: SimilaritySpace::Oklab,
            keep_deltas: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityReport {
    pub mean_delta: f64,
    pub max_delta: f64,
    /// `100 / (1 + mean_delta / 0.05)`: 100 for identical images
    pub score: f64,
    #[serde(skip)]
    pub deltas: Option<Vec<f64>>,
}

/// Score for a mean delta.
#[inline]
pub fn similarity_score(mean_delta: f64) -> f64 {
    100.0 / (1.0 + mean_delta / SCORE_HALF_POINT)
}

/// Compare two row-major unit-RGB buffers of the same size.
///
/// Returns `None` when the buffers do not both hold `width * height` pixels.
pub fn compare(
    reference: &[[f64; 3]],
    test: &[[f64; 3]],
    width: usize,
    height: usize,
    options: &SimilarityOptions,
) -> Option<SimilarityReport> {
    let n = width * height;
    if reference.len() != n || test.len() != n {
        return None;
    }
    if n == 0 {
        return Some(SimilarityReport {
            mean_delta: 0.0,
            max_delta: 0.0,
            score: 100.0,
            deltas: options.keep_deltas.then(Vec::new),
        });
    }

    let a = blur_rgb(reference, width, height, options.radius);
    let b = blur_rgb(test, width, height, options.radius);

    let deltas: Vec<f64> = a
        .iter()
        .zip(&b)
        .map(|(&pa, &pb)| match options.space {
            SimilaritySpace::Oklab => Oklab::from_srgb_unit(pa).distance(Oklab::from_srgb_unit(pb)),
            SimilaritySpace::Lab => {
                let la = Lab::from_srgb_unit(pa);
                let lb = Lab::from_srgb_unit(pb);
                let (dl, da, db) = (la.l - lb.l, la.a - lb.a, la.b - lb.b);
                (dl * dl + da * da + db * db).sqrt() / 100.0
            }
        })
        .collect();

    let mean_delta = deltas.iter().sum::<f64>() / n as f64;
    let max_delta = deltas.iter().copied().fold(0.0, f64::max);

    Some(SimilarityReport {
        mean_delta,
        max_delta,
        score: similarity_score(mean_delta),
        deltas: options.keep_deltas.then_some(deltas),
    })
}

/// [`compare`] for two pixel buffers; `None` when the sizes differ.
pub fn compare_buffers(
    reference: &PixelBuffer,
    test: &PixelBuffer,
    options: &SimilarityOptions,
) -> Option<SimilarityReport> {
    if (reference.width(), reference.height()) != (test.width(), test.height()) {
        return None;
    }
    compare(
        &reference.to_unit_pixels(),
        &test.to_unit_pixels(),
        reference.width(),
        reference.height(),
        options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb8;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_score_curve() {
        assert_eq!(similarity_score(0.0), 100.0);
        assert_eq!(similarity_score(0.05), 50.0);
    }

    #[test]
    fn test_size_mismatch() {
        let a = PixelBuffer::new(2, 2);
        let b = PixelBuffer::new(2, 3);
        assert_eq!(compare_buffers(&a, &b, &SimilarityOptions::default()), None);
        assert_eq!(compare(&[[0.0; 3]], &[], 1, 1, &SimilarityOptions::default()), None);
    }

    #[test]
    fn test_deltas_are_kept_on_request() {
        let a = PixelBuffer::from_fn(4, 4, |x, _| Rgb8::new(x as u8 * 60, 0, 0));
        let b = PixelBuffer::new(4, 4);
        let options = SimilarityOptions {
            keep_deltas: true,
            space: SimilaritySpace::Lab,
            ..Default::default()
        };
        let report = compare_buffers(&a, &b, &options).unwrap();
        let deltas = report.deltas.unwrap();
        assert_eq!(deltas.len(), 16);
        assert!(report.max_delta >= report.mean_delta && report.mean_delta > 0.0);
        assert!(report.score < 100.0);
    }
}
