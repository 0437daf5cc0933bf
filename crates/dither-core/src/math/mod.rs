//! Small fixed-size linear algebra
//!
//! [`Matrix3`] carries the symmetric eigen-decomposition and rotation
//! blending used for gamut alignment; [`Matrix2`] rotates ordered-dither
//! lattices. [`AxisStats`] summarizes color distributions for both.

mod matrix2;
mod matrix3;
mod stats;

pub use matrix2::Matrix2;
pub use matrix3::{Eigen3, Matrix3, JACOBI_SWEEPS};
pub use stats::{AxisStats, MIN_COVARIANCE_SAMPLES};
