//! Color types and conversion utilities
//!
//! - [`Rgb`] / [`Rgb8`]: 8-bit channel semantics for pipeline values and sinks
//! - [`ColorSpace`] / [`ColorVector`]: the 13 named spaces and their values
//! - [`Oklab`] / [`Oklch`] / [`Lab`] / [`Lch`]: perceptual spaces
//! - [`AxisTriple`]: normalized projection used for statistics
//!
//! # Example
//!
//! ```
//! use dither_core::color::{to_rgb_unit, to_vector, ColorSpace};
//!
//! let v = to_vector([0.25, 0.5, 0.75], ColorSpace::Oklch);
//! let back = to_rgb_unit(&v);
//! assert!((back[1] - 0.5).abs() < 1e-9);
//! ```

mod axes;
mod lab;
mod oklab;
mod rgb;
mod space;
mod transfer;

pub use axes::{
    axes_to_rgb, coords_distance_squared, distance_coords, from_axes, rgb_distance_coords,
    rgb_to_axes, to_axes, AxisTriple, OKLCH_CHROMA_SCALE,
};
pub use lab::{Lab, Lch};
pub use oklab::{Oklab, Oklch};
pub use rgb::{Rgb, Rgb8};
pub use space::{lerp_angle, mix_vectors, to_rgb_unit, to_vector, ColorSpace, ColorVector};
pub use transfer::{linear_to_srgb, srgb_to_linear};
