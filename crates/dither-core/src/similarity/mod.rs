//! Perceptual similarity metric
//!
//! - [`gaussian_kernel`] / [`blur_rgb`]: separable, edge-clamped blur
//! - [`compare`] / [`compare_buffers`]: blurred per-pixel OKLab (or Lab)
//!   deltas summarized into a 0..100 score

mod blur;
mod metric;

pub use blur::{blur_rgb, gaussian_kernel, MIN_SIGMA};
pub use metric::{
    compare, compare_buffers, similarity_score, SimilarityOptions, SimilarityReport,
    SimilaritySpace,
};
