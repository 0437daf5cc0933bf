//! Gamut conditioning of source colors
//!
//! - [`GamutTransform`]: statistical alignment of source colors to the palette
//! - [`fit_to_gamut`]: OKLCH chroma reduction back into sRGB

mod fit;
mod transform;

pub use fit::{fit_to_gamut, GamutFit, CHROMA_SHRINK, MAX_FIT_STEPS};
pub use transform::{GamutStrengths, GamutTransform, ACTIVE_THRESHOLD};
