//! sRGB transfer function (IEC 61966-2-1), exact piecewise formulas in both
//! directions.

/// Gamma-encoded unit value to linear light.
#[inline]
pub fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear light to gamma-encoded unit value.
#[inline]
pub fn linear_to_srgb(v: f64) -> f64 {
    if v <= 0.0031308 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_continuity() {
        // Both branches meet at the breakpoints
        let below = 0.04045 / 12.92;
        let above = ((0.04045_f64 + 0.055) / 1.055).powf(2.4);
        assert!((below - above).abs() < 1e-6);
        assert!((linear_to_srgb(0.0031308) - 0.0031308 * 12.92).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip() {
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            let back = linear_to_srgb(srgb_to_linear(v));
            assert!((v - back).abs() < 1e-12, "round trip failed at {v}: {back}");
        }
    }

    #[test]
    fn test_eight_bit_endpoints_decode_exactly() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(255.0 / 255.0) - 1.0).abs() < 1e-12);
        // Channel 10 is below the linear-segment breakpoint
        assert_eq!(srgb_to_linear(10.0 / 255.0), 10.0 / 255.0 / 12.92);
    }
}
