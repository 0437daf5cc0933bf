//! False-color ramp for diagnostic stages.

use crate::color::Rgb8;

/// Ramp stops, evenly spaced over 0..=1: black, red, yellow, white.
const STOPS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [255.0, 0.0, 0.0],
    [255.0, 255.0, 0.0],
    [255.0, 255.0, 255.0],
];

/// Map `value` in 0..=1 onto the heat ramp. Non-finite values map to black.
pub fn heat_color(value: f64) -> Rgb8 {
    let v = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let pos = v * (STOPS.len() - 1) as f64;
    let i = (pos.floor() as usize).min(STOPS.len() - 2);
    let t = pos - i as f64;
    let [a, b] = [STOPS[i], STOPS[i + 1]];
    let c = |k: usize| (a[k] + (b[k] - a[k]) * t).round().clamp(0.0, 255.0) as u8;
    Rgb8::new(c(0), c(1), c(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ramp_endpoints_and_stops() {
        assert_eq!(heat_color(0.0), Rgb8::new(0, 0, 0));
        assert_eq!(heat_color(1.0 / 3.0), Rgb8::new(255, 0, 0));
        assert_eq!(heat_color(1.0), Rgb8::new(255, 255, 255));
        assert_eq!(heat_color(7.0), Rgb8::new(255, 255, 255));
        assert_eq!(heat_color(f64::NAN), Rgb8::new(0, 0, 0));
    }

    #[test]
    fn test_ramp_is_monotonic_in_brightness() {
        let mut last = 0u32;
        for i in 0..=100 {
            let c = heat_color(i as f64 / 100.0);
            let sum = c.r as u32 + c.g as u32 + c.b as u32;
            assert!(sum >= last);
            last = sum;
        }
    }
}
