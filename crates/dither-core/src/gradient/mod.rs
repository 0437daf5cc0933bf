//! Gradient fields from sparse control points
//!
//! [`resolve_control_points`] places swatches, [`GradientField`] blends them
//! by inverse-distance weighting in a chosen color space.

mod field;
mod layout;

pub use field::GradientField;
pub use layout::{
    perimeter_layout, perimeter_point, resolve_control_points, GradientControlPoint,
    ResolvedPoint,
};
