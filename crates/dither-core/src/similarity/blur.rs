//! Separable Gaussian blur with clamped edges.

/// Smallest sigma used, whatever radius is requested.
pub const MIN_SIGMA: f64 = 0.25;

/// Normalized 1-D Gaussian taps for `radius` (used as sigma).
///
/// Sigma is `max(0.25, radius)` and the kernel reaches `ceil(3σ)` pixels
/// each side.
pub fn gaussian_kernel(radius: f64) -> Vec<f64> {
    let sigma = if radius.is_finite() {
        radius.max(MIN_SIGMA)
    } else {
        MIN_SIGMA
    };
    let reach = (3.0 * sigma).ceil() as i64;
    let mut taps: Vec<f64> = (-reach..=reach)
        .map(|i| (-((i * i) as f64) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f64 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Blur a row-major RGB buffer horizontally then vertically.
pub fn blur_rgb(pixels: &[[f64; 3]], width: usize, height: usize, radius: f64) -> Vec<[f64; 3]> {
    if pixels.len() != width * height || pixels.is_empty() {
        return pixels.to_vec();
    }
    let taps = gaussian_kernel(radius);
    let reach = (taps.len() / 2) as i64;

    let mut horizontal = vec![[0.0; 3]; pixels.len()];
    for y in 0..height {
        let row = &pixels[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = [0.0; 3];
            for (k, &w) in taps.iter().enumerate() {
                let sx = (x as i64 + k as i64 - reach).clamp(0, width as i64 - 1) as usize;
                for c in 0..3 {
                    acc[c] += row[sx][c] * w;
                }
            }
            horizontal[y * width + x] = acc;
        }
    }

    let mut out = vec![[0.0; 3]; pixels.len()];
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0; 3];
            for (k, &w) in taps.iter().enumerate() {
                let sy = (y as i64 + k as i64 - reach).clamp(0, height as i64 - 1) as usize;
                for c in 0..3 {
                    acc[c] += horizontal[sy * width + x][c] * w;
                }
            }
            out[y * width + x] = acc;
        }
    }
    out
}
