//! Control point placement
//!
//! Swatches with an explicit position keep it. The rest are spread around
//! the unit square's perimeter: the four corners first, then repeatedly the
//! midpoint of the longest remaining perimeter gap.

use serde::{Deserialize, Serialize};

use crate::color::Rgb8;

/// Perimeter length of the unit square.
const PERIMETER: f64 = 4.0;

/// A user-authored gradient swatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientControlPoint {
    pub color: Rgb8,
    /// Position in 0..=1 on both axes; `None` for automatic placement
    #[serde(default)]
    pub position: Option<[f64; 2]>,
}

impl GradientControlPoint {
    pub fn new(color: Rgb8) -> Self {
        Self {
            color,
            position: None,
        }
    }

    pub fn at(color: Rgb8, x: f64, y: f64) -> Self {
        Self {
            color,
            position: Some([x, y]),
        }
    }
}

/// A control point with its final position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPoint {
    pub color: Rgb8,
    pub position: [f64; 2],
}

/// Give every swatch a position.
///
/// Explicit positions are clamped to the unit square (non-finite
/// coordinates become 0). Swatches without one take the perimeter slots in
/// order of appearance.
pub fn resolve_control_points(swatches: &[GradientControlPoint]) -> Vec<ResolvedPoint> {
    let auto_count = swatches.iter().filter(|s| s.position.is_none()).count();
    let mut slots = perimeter_layout(auto_count).into_iter();

    swatches
        .iter()
        .map(|s| {
            let position = match s.position {
                Some([x, y]) => [unit(x), unit(y)],
                None => slots.next().map(perimeter_point).unwrap_or([0.0, 0.0]),
            };
            ResolvedPoint {
                color: s.color,
                position,
            }
        })
        .collect()
}

/// Perimeter parameters (0..4) for `count` automatically placed points,
/// in placement order.
pub fn perimeter_layout(count: usize) -> Vec<f64> {
    let mut placed: Vec<f64> = [0.0, 1.0, 2.0, 3.0].into_iter().take(count).collect();
    let mut sorted = placed.clone();

    while placed.len() < count {
        // Longest gap between neighbors, wrapping from the last back to the first
        let mut best = (0usize, f64::MIN);
        for i in 0..sorted.len() {
            let start = sorted[i];
            let end = if i + 1 < sorted.len() {
                sorted[i + 1]
            } else {
                sorted[0] + PERIMETER
            };
            let gap = end - start;
            if gap > best.1 + 1e-12 {
                best = (i, gap);
            }
        }
        let t = (sorted[best.0] + best.1 / 2.0).rem_euclid(PERIMETER);
        placed.push(t);
        let at = sorted.partition_point(|&s| s < t);
        sorted.insert(at, t);
    }
    placed
}

/// Map a perimeter parameter to a point on the unit square, clockwise from
/// the top-left corner.
pub fn perimeter_point(t: f64) -> [f64; 2] {
    let t = t.rem_euclid(PERIMETER);
    if t < 1.0 {
        [t, 0.0]
    } else if t < 2.0 {
        [1.0, t - 1.0]
    } else if t < 3.0 {
        [3.0 - t, 1.0]
    } else {
        [0.0, 4.0 - t]
    }
}

fn unit(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_corners_first() {
        assert_eq!(perimeter_layout(3), vec![0.0, 1.0, 2.0]);
        assert_eq!(perimeter_point(0.0), [0.0, 0.0]);
        assert_eq!(perimeter_point(1.0), [1.0, 0.0]);
        assert_eq!(perimeter_point(2.0), [1.0, 1.0]);
        assert_eq!(perimeter_point(3.0), [0.0, 1.0]);
        assert_eq!(perimeter_point(3.5), [0.0, 0.5]);
    }

    #[test]
    fn test_bisection_fills_longest_gaps_in_order() {
        assert_eq!(
            perimeter_layout(8),
            vec![0.0, 1.0, 2.0, 3.0, 0.5, 1.5, 2.5, 3.5]
        );
        // Ninth point splits the first quarter-edge gap
        assert_eq!(perimeter_layout(9)[8], 0.25);
    }

    #[test]
    fn test_empty_layout() {
        assert!(perimeter_layout(0).is_empty());
        assert!(resolve_control_points(&[]).is_empty());
    }

    #[test]
    fn test_explicit_positions_pass_through() {
        let red = Rgb8::new(255, 0, 0);
        let blue = Rgb8::new(0, 0, 255);
        let points = resolve_control_points(&[
            GradientControlPoint::at(red, 0.3, 0.7),
            GradientControlPoint::new(blue),
            GradientControlPoint::at(red, 2.0, f64::NAN),
            GradientControlPoint::new(red),
        ]);
        assert_eq!(points[0].position, [0.3, 0.7]);
        assert_eq!(points[1].position, [0.0, 0.0]);
        assert_eq!(points[2].position, [1.0, 0.0]);
        assert_eq!(points[3].position, [1.0, 0.0]);
    }
}
