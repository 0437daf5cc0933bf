//! Inverse-distance-weighted gradient field
//!
//! Every control point contributes to every sample with weight `1 / d²`.
//! Blending happens on the field's own color space components; hue
//! components are averaged on the circle so the blend follows hue geometry.

use super::layout::ResolvedPoint;
use crate::color::{to_rgb_unit, to_vector, ColorSpace, ColorVector, Rgb};
use crate::output::PixelBuffer;

/// Squared distance below which a sample counts as hitting a control point.
const EXACT_HIT_DISTANCE_SQUARED: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
struct FieldPoint {
    position: [f64; 2],
    rgb: Rgb,
    vector: ColorVector,
}

/// A continuous color field over the unit square.
///
/// # Example
///
/// ```
/// use dither_core::gradient::{resolve_control_points, GradientControlPoint, GradientField};
/// use dither_core::{ColorSpace, Rgb, Rgb8};
///
/// let points = resolve_control_points(&[
///     GradientControlPoint::new(Rgb8::new(255, 0, 0)),
///     GradientControlPoint::new(Rgb8::new(0, 0, 255)),
/// ]);
/// let field = GradientField::new(&points, ColorSpace::Oklch);
/// assert_eq!(field.sample(0.0, 0.0), Rgb::new(255.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    space: ColorSpace,
    points: Vec<FieldPoint>,
}

impl GradientField {
    pub fn new(points: &[ResolvedPoint], space: ColorSpace) -> Self {
        let points = points
            .iter()
            .map(|p| {
                let rgb = Rgb::from(p.color);
                FieldPoint {
                    position: p.position,
                    rgb,
                    vector: to_vector(rgb.to_unit(), space),
                }
            })
            .collect();
        Self { space, points }
    }

    #[inline]
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Color at (u, v) in unit coordinates.
    ///
    /// Empty fields are black and single-point fields constant. Samples on a
    /// control point return its color unchanged.
    pub fn sample(&self, u: f64, v: f64) -> Rgb {
        match self.points.as_slice() {
            [] => return Rgb::BLACK,
            [only] => return only.rgb,
            _ => {}
        }

        let hue = self.space.hue_index();
        let mut weight_sum = 0.0;
        let mut acc = [0.0; 4];
        let (mut hue_sin, mut hue_cos) = (0.0, 0.0);

        for p in &self.points {
            let dx = u - p.position[0];
            let dy = v - p.position[1];
            let d2 = dx * dx + dy * dy;
            if d2 < EXACT_HIT_DISTANCE_SQUARED {
                return p.rgb;
            }
            let w = 1.0 / d2;
            weight_sum += w;

            let c = p.vector.components();
            for (i, value) in c.iter().enumerate() {
                if Some(i) == hue {
                    let (s, co) = value.to_radians().sin_cos();
                    hue_sin += w * s;
                    hue_cos += w * co;
                } else {
                    acc[i] += w * value;
                }
            }
        }

        if !(weight_sum > 0.0 && weight_sum.is_finite()) {
            return self.points[0].rgb;
        }

        let mut blended = acc.map(|a| a / weight_sum);
        if let Some(h) = hue {
            blended[h] = if hue_sin.abs() < 1e-12 && hue_cos.abs() < 1e-12 {
                0.0
            } else {
                hue_sin.atan2(hue_cos).to_degrees().rem_euclid(360.0)
            };
        }

        Rgb::from_unit(to_rgb_unit(&ColorVector::from_components(self.space, blended)))
    }

    /// Sample every pixel center into a new buffer.
    pub fn render(&self, width: usize, height: usize) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            let u = (x as f64 + 0.5) / width as f64;
            let v = (y as f64 + 0.5) / height as f64;
            self.sample(u, v).to_rgb8()
        })
    }
}
