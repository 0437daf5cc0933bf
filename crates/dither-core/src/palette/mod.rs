//! Palette types and utilities
//!
//! Parsing of free-text palette definitions, nearest-color reduction in a
//! configurable distance space and per-pixel strength modulation.

mod error;
mod modulation;
mod palette;
mod parse;

pub use error::{PaletteError, ParseColorError};
pub use modulation::{modulation_factor, ModulationOptions, ModulationTerm};
pub use palette::{DistanceSummary, PaletteEntry, PaletteUsage, Quantized, ReductionPalette};
pub use parse::{parse_palette_text, PaletteText};
