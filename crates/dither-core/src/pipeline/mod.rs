//! The per-pixel transform chain
//!
//! gamma → gamut alignment (+ OKLCH fit) → palette nudge → strength
//! modulation → dither → quantize, in one top-to-bottom pass.

mod heatmap;
mod options;
mod render;

pub use heatmap::heat_color;
pub use options::{GamutOptions, PipelineOptions, PreviewStage, GAMMA_EPSILON};
pub use render::{
    apply_gamma, nudge_toward_palette, render, RenderOutput, DELTA_HEAT_SCALE, EDGE_FULL_GRADIENT,
};
