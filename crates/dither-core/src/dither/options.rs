//! Dithering options and configuration.

use serde::{Deserialize, Serialize};

use super::kernel::DiffusionKernel;
use super::DitherKind;

/// Configuration of the dithering stage.
///
/// # Defaults
///
/// - kind: Bayer 8×8
/// - strength: 0.5
/// - seed: 0
/// - kernel: Floyd–Steinberg (used by [`DitherKind::ErrorDiffusion`] only)
/// - pattern rotation: 0°
///
/// # Example
///
/// ```
/// use dither_core::dither::{DitherKind, DitherOptions};
///
/// let options = DitherOptions::new()
///     .kind(DitherKind::BlueNoise)
///     .strength(0.8)
///     .seed(42.0);
/// assert_eq!(options.kind, DitherKind::BlueNoise);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DitherOptions {
    pub kind: DitherKind,
    /// Jitter amplitude as a fraction of the full 0..255 range, or the share
    /// of residual diffused for error diffusion. Clamped to 0..=1.
    pub strength: f64,
    /// Non-finite or negative seeds behave like 0.
    pub seed: f64,
    pub kernel: DiffusionKernel,
    /// Rotation of ordered and tile patterns, in degrees.
    pub pattern_rotation: f64,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            kind: DitherKind::Bayer8,
            strength: 0.5,
            seed: 0.0,
            kernel: DiffusionKernel::FloydSteinberg,
            pattern_rotation: 0.0,
        }
    }
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: DitherKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn seed(mut self, seed: f64) -> Self {
        self.seed = seed;
        self
    }

    pub fn kernel(mut self, kernel: DiffusionKernel) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn pattern_rotation(mut self, degrees: f64) -> Self {
        self.pattern_rotation = degrees;
        self
    }

    /// Strength clamped to 0..=1, non-finite values as 0.
    pub fn effective_strength(&self) -> f64 {
        if self.strength.is_finite() {
            self.strength.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
