//! Dithering algorithms.
//!
//! # Families
//!
//! - **Ordered** (Bayer 2/4/8/16): stateless matrix thresholds
//! - **Random** (bw / grayscale / rgb / color): stateless hash noise
//! - **Blue noise**: a procedural [`ThresholdTile`] built once per seed
//! - **Error diffusion**: seven kernels driven through an
//!   [`ErrorDiffusionContext`], strictly scanline ordered
//!
//! The stateless families all go through [`apply_dither_jitter`]; error
//! diffusion is driven by the caller because it needs the quantized color.
//!
//! Strength is always a plain per-pixel scalar. Callers modulate it however
//! they like (palette ambiguity, edge masking) before passing it in.

mod bayer;
mod diffusion;
mod kernel;
mod noise;
mod options;
mod tile;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use bayer::{bayer_size, bayer_threshold, bayer_value, build_bayer_matrix};
pub use diffusion::ErrorDiffusionContext;
pub use kernel::*;
pub use noise::{
    noise_hash, normalize_seed, OFFSET_BW, OFFSET_COLOR, OFFSET_GRAYSCALE, OFFSET_RGB,
    OFFSET_TILE,
};
pub use options::DitherOptions;
pub use tile::{ThresholdTile, DEFAULT_TILE_SIZE};

use crate::color::Rgb;
use crate::math::Matrix2;

/// Dither algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DitherKind {
    None,
    Bayer2,
    Bayer4,
    #[default]
    Bayer8,
    Bayer16,
    RandomBw,
    RandomGrayscale,
    RandomRgb,
    RandomColor,
    BlueNoise,
    ErrorDiffusion,
}

impl DitherKind {
    pub const ALL: [DitherKind; 11] = [
        DitherKind::None,
        DitherKind::Bayer2,
        DitherKind::Bayer4,
        DitherKind::Bayer8,
        DitherKind::Bayer16,
        DitherKind::RandomBw,
        DitherKind::RandomGrayscale,
        DitherKind::RandomRgb,
        DitherKind::RandomColor,
        DitherKind::BlueNoise,
        DitherKind::ErrorDiffusion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DitherKind::None => "none",
            DitherKind::Bayer2 => "bayer2",
            DitherKind::Bayer4 => "bayer4",
            DitherKind::Bayer8 => "bayer8",
            DitherKind::Bayer16 => "bayer16",
            DitherKind::RandomBw => "random-bw",
            DitherKind::RandomGrayscale => "random-grayscale",
            DitherKind::RandomRgb => "random-rgb",
            DitherKind::RandomColor => "random-color",
            DitherKind::BlueNoise => "blue-noise",
            DitherKind::ErrorDiffusion => "error-diffusion",
        }
    }

    /// Matrix size for the ordered kinds.
    pub fn bayer_size(self) -> Option<usize> {
        match self {
            DitherKind::Bayer2 => Some(2),
            DitherKind::Bayer4 => Some(4),
            DitherKind::Bayer8 => Some(8),
            DitherKind::Bayer16 => Some(16),
            _ => None,
        }
    }

    /// Whether the kind needs a [`ThresholdTile`].
    pub fn uses_tile(self) -> bool {
        self == DitherKind::BlueNoise
    }

    /// Whether the pattern is laid on a lattice that can be rotated.
    pub fn is_patterned(self) -> bool {
        self.bayer_size().is_some() || self.uses_tile()
    }
}

impl fmt::Display for DitherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps pixel coordinates onto the (possibly rotated) pattern lattice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PatternLattice {
    rotation: Option<Matrix2>,
}

impl PatternLattice {
    /// Lattice rotated by `degrees`; angles that are multiples of 360° (or
    /// non-finite) leave coordinates untouched.
    pub fn new(degrees: f64) -> Self {
        if !degrees.is_finite() || degrees.rem_euclid(360.0).abs() < 1e-9 {
            return Self { rotation: None };
        }
        Self {
            rotation: Some(Matrix2::rotation(degrees.to_radians())),
        }
    }

    #[inline]
    pub fn map(&self, x: usize, y: usize) -> (i64, i64) {
        match &self.rotation {
            None => (x as i64, y as i64),
            Some(r) => {
                let [rx, ry] = r.mul_vec([x as f64, y as f64]);
                (rx.round() as i64, ry.round() as i64)
            }
        }
    }
}

/// Add the jitter of a stateless dither family to `rgb`.
///
/// `x`/`y` are lattice coordinates (see [`PatternLattice`]). `strength`
/// scales a −0.5..0.5 pattern value to `strength * 255` channel units.
/// [`DitherKind::None`] and [`DitherKind::ErrorDiffusion`] return `rgb`
/// unchanged, as does [`DitherKind::BlueNoise`] without a tile.
pub fn apply_dither_jitter(
    rgb: Rgb,
    x: i64,
    y: i64,
    kind: DitherKind,
    strength: f64,
    seed: u32,
    tile: Option<&ThresholdTile>,
) -> Rgb {
    if !strength.is_finite() || strength == 0.0 {
        return rgb;
    }
    let amplitude = strength * 255.0;
    let binary = |h: f64| if h < 0.5 { -0.5 } else { 0.5 };

    match kind {
        DitherKind::None | DitherKind::ErrorDiffusion => rgb,
        DitherKind::Bayer2 | DitherKind::Bayer4 | DitherKind::Bayer8 | DitherKind::Bayer16 => {
            let n = kind.bayer_size().unwrap_or(2);
            rgb.offset(bayer_threshold(n, x, y) * amplitude)
        }
        DitherKind::RandomBw => rgb.offset(binary(noise_hash(seed, x, y, OFFSET_BW)) * amplitude),
        DitherKind::RandomGrayscale => {
            rgb.offset((noise_hash(seed, x, y, OFFSET_GRAYSCALE) - 0.5) * amplitude)
        }
        DitherKind::RandomRgb => {
            let j = |c: u32| binary(noise_hash(seed, x, y, OFFSET_RGB + c)) * amplitude;
            Rgb::new(rgb.r + j(0), rgb.g + j(1), rgb.b + j(2))
        }
        DitherKind::RandomColor => {
            let j = |c: u32| (noise_hash(seed, x, y, OFFSET_COLOR + c) - 0.5) * amplitude;
            Rgb::new(rgb.r + j(0), rgb.g + j(1), rgb.b + j(2))
        }
        DitherKind::BlueNoise => match tile {
            Some(tile) => rgb.offset(tile.sample(x, y) * amplitude),
            None => rgb,
        },
    }
}
