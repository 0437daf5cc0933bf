#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::module_inception,
    clippy::manual_range_contains
)]

//! dither-core: color-space math, dithering and palette reduction
//!
//! A source image (a bitmap or an interpolated gradient field) goes through
//! a fixed chain of perceptual transforms, gets dithered and is finally
//! quantized to a fixed palette. Palette usage and a perceptual similarity
//! score are reported along the way.
//!
//! # Quick Start
//!
//! ```
//! use dither_core::pipeline::{render, PipelineOptions, PreviewStage};
//! use dither_core::{ColorSpace, PixelBuffer, ReductionPalette, Rgb8};
//!
//! let palette = ReductionPalette::new(
//!     &[Rgb8::new(0, 0, 0), Rgb8::new(255, 255, 255)],
//!     ColorSpace::Oklab,
//! );
//! let source = PixelBuffer::from_fn(4, 4, |x, _| Rgb8::new(x as u8 * 60, 0, 0));
//! let out = render(&source, &palette, &PipelineOptions::default());
//!
//! let reduced = out.stage(PreviewStage::Reduced).unwrap();
//! assert_eq!(reduced.width(), 4);
//! assert_eq!(out.usage.total, 16);
//! ```
//!
//! # Pipeline
//!
//! Per pixel, top to bottom and left to right:
//!
//! 1. gamma, `255 · (c / 255)^(1 / γ)`
//! 2. statistical gamut alignment toward the palette, then OKLCH gamut fit
//! 3. palette nudge toward the nearest entry
//! 4. strength modulation from palette distances and edge sharpness
//! 5. ordered, random or blue-noise jitter, or error diffusion
//! 6. nearest-color quantization, residual diffused to later pixels
//!
//! # Color Spaces
//!
//! [`ColorSpace`] names the 13 supported spaces. Any of them can be used for
//! gradient interpolation, gamut statistics or palette distances. Hue-bearing
//! spaces interpolate along the shorter arc.
//!
//! # Determinism
//!
//! Nothing is global. Noise is a pure function of seed and coordinates, and
//! every render builds its own diffusion rows and noise tile, so equal
//! inputs give byte-identical outputs.

pub mod color;
pub mod dither;
pub mod gamut;
pub mod gradient;
pub mod math;
pub mod output;
pub mod palette;
pub mod pipeline;
pub mod similarity;

#[cfg(test)]
mod domain_tests;

pub use color::{ColorSpace, ColorVector, Rgb, Rgb8};
pub use dither::{DitherKind, DitherOptions};
pub use gamut::GamutTransform;
pub use gradient::{GradientControlPoint, GradientField};
pub use output::PixelBuffer;
pub use palette::{PaletteError, ParseColorError, ReductionPalette};
pub use pipeline::{render, PipelineOptions, PreviewStage, RenderOutput};
pub use similarity::{SimilarityOptions, SimilarityReport};
