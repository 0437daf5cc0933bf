//! Pipeline configuration.
//!
//! Every block deserializes with defaults for missing fields, so a config
//! only needs to name what it changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::ColorSpace;
use crate::dither::DitherOptions;
use crate::gamut::GamutStrengths;
use crate::palette::ModulationOptions;
use crate::similarity::SimilarityOptions;

/// Gamma values this close to 1 skip the gamma step.
pub const GAMMA_EPSILON: f64 = 1e-3;

/// Images the pipeline can hand back, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewStage {
    Source,
    GamutAdjusted,
    Dithered,
    Reduced,
    PaletteError,
    PaletteAmbiguity,
    PaletteModulation,
    PerceptualDelta,
}

impl PreviewStage {
    pub const ALL: [PreviewStage; 8] = [
        PreviewStage::Source,
        PreviewStage::GamutAdjusted,
        PreviewStage::Dithered,
        PreviewStage::Reduced,
        PreviewStage::PaletteError,
        PreviewStage::PaletteAmbiguity,
        PreviewStage::PaletteModulation,
        PreviewStage::PerceptualDelta,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PreviewStage::Source => "source",
            PreviewStage::GamutAdjusted => "gamut-adjusted",
            PreviewStage::Dithered => "dithered",
            PreviewStage::Reduced => "reduced",
            PreviewStage::PaletteError => "palette-error",
            PreviewStage::PaletteAmbiguity => "palette-ambiguity",
            PreviewStage::PaletteModulation => "palette-modulation",
            PreviewStage::PerceptualDelta => "perceptual-delta",
        }
    }
}

impl fmt::Display for PreviewStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Statistical gamut alignment toward the palette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamutOptions {
    pub enabled: bool,
    /// Space the statistics are measured in
    pub space: ColorSpace,
    pub strengths: GamutStrengths,
    /// Pull out-of-range results back in by OKLCH chroma reduction
    pub fit: bool,
}

impl Default for GamutOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            space: ColorSpace::Oklab,
            strengths: GamutStrengths::default(),
            fit: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Output = 255 · (input / 255)^(1 / gamma)
    pub gamma: f64,
    pub gamut: GamutOptions,
    /// Mix each color toward its nearest palette entry before dithering
    /// (0 = off, 1 = snap)
    pub palette_nudge: f64,
    pub modulation: ModulationOptions,
    /// Reduce dither strength on sharp edges (0 = off, 1 = full)
    pub edge_mask: f64,
    pub dither: DitherOptions,
    pub similarity: SimilarityOptions,
    pub stages: Vec<PreviewStage>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            gamma: 1.0,
            gamut: GamutOptions::default(),
            palette_nudge: 0.0,
            modulation: ModulationOptions::default(),
            edge_mask: 0.0,
            dither: DitherOptions::default(),
            similarity: SimilarityOptions::default(),
            stages: vec![PreviewStage::Source, PreviewStage::Reduced],
        }
    }
}

impl PipelineOptions {
    /// Gamma to apply, or `None` when the step is skipped.
    pub fn effective_gamma(&self) -> Option<f64> {
        let g = self.gamma;
        if !g.is_finite() || g <= 0.0 || (g - 1.0).abs() < GAMMA_EPSILON {
            None
        } else {
            Some(g)
        }
    }

    pub fn wants(&self, stage: PreviewStage) -> bool {
        self.stages.contains(&stage)
    }
}
