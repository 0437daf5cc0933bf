//! Recursive Bayer (ordered dither) matrices
//!
//! An n×n matrix is four copies of the n/2 matrix scaled by 4, offset by
//! 0, 2, 3 and 1 in the top-left, top-right, bottom-left and bottom-right
//! quadrants. The 2×2 base is `[[0, 2], [3, 1]]`.

const BASE: [[u32; 2]; 2] = [[0, 2], [3, 1]];
/// Quadrant offsets indexed by `[y_half][x_half]`
const QUADRANT_OFFSET: [[u32; 2]; 2] = [[0, 2], [3, 1]];

/// Round a requested size to a supported matrix size (power of two, ≥ 2).
pub fn bayer_size(n: usize) -> usize {
    n.max(2).next_power_of_two()
}

/// Matrix entry at `(x, y)` of the n×n Bayer matrix, without building it.
///
/// `n` is rounded with [`bayer_size`]; coordinates wrap.
pub fn bayer_value(n: usize, x: i64, y: i64) -> u32 {
    let n = bayer_size(n) as i64;
    let mut x = x.rem_euclid(n) as usize;
    let mut y = y.rem_euclid(n) as usize;
    let mut size = n as usize;
    let mut value = 0u32;
    let mut scale = 1u32;

    // Outermost quadrant offset first, at scale 1
    while size > 2 {
        let half = size / 2;
        let qx = x / half;
        let qy = y / half;
        value += QUADRANT_OFFSET[qy][qx] * scale;
        scale *= 4;
        x %= half;
        y %= half;
        size = half;
    }
    // The base matrix sits under every level, so it carries the largest scale
    BASE[y][x] * scale + value
}

/// Build the full n×n matrix, row-major. Contains each of `0..n²` once.
pub fn build_bayer_matrix(n: usize) -> Vec<Vec<u32>> {
    let n = bayer_size(n);
    (0..n)
        .map(|y| (0..n).map(|x| bayer_value(n, x as i64, y as i64)).collect())
        .collect()
}

/// Centered threshold `(m + 0.5) / n² − 0.5` in −0.5..0.5.
#[inline]
pub fn bayer_threshold(n: usize, x: i64, y: i64) -> f64 {
    let n = bayer_size(n);
    let cells = (n * n) as f64;
    (bayer_value(n, x, y) as f64 + 0.5) / cells - 0.5
}
