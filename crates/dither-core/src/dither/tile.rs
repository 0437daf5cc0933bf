//! Procedural threshold tiles
//!
//! A blue-noise tile is derived from white noise: every cell is scored by
//! how much it stands out from its eight neighbors (plus a small bias toward
//! its own value), then cells are ranked by score and the ranks spread evenly
//! over −0.5..0.5. High-pass scoring pushes neighboring thresholds apart,
//! which moves the pattern's energy toward high frequencies.

use super::noise::{noise_hash, OFFSET_TILE};

pub const DEFAULT_TILE_SIZE: usize = 64;
/// Weight of the cell's own value in its score.
const VALUE_BIAS: f64 = 0.25;

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTile {
    size: usize,
    data: Vec<f32>,
}

impl ThresholdTile {
    /// Build a `size × size` blue-noise tile from `seed` (size is at least 2).
    pub fn blue_noise(seed: u32, size: usize) -> Self {
        let size = size.max(2);
        let n = size * size;

        let white: Vec<f64> = (0..n)
            .map(|i| noise_hash(seed, (i % size) as i64, (i / size) as i64, OFFSET_TILE))
            .collect();

        let at = |x: usize, y: usize, dx: isize, dy: isize| -> f64 {
            let nx = (x as isize + dx).rem_euclid(size as isize) as usize;
            let ny = (y as isize + dy).rem_euclid(size as isize) as usize;
            white[ny * size + nx]
        };

        let scores: Vec<f64> = (0..n)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                let mut sum = 0.0;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx != 0 || dy != 0 {
                            sum += at(x, y, dx, dy);
                        }
                    }
                }
                let v = white[i];
                (v - sum / 8.0) + VALUE_BIAS * (v - 0.5)
            })
            .collect();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]).then(a.cmp(&b)));

        let mut data = vec![0.0_f32; n];
        let last = (n - 1) as f64;
        for (rank, &cell) in order.iter().enumerate() {
            data[cell] = (rank as f64 / last - 0.5) as f32;
        }

        tracing::trace!(seed, size, "Generated blue-noise tile");
        Self { size, data }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Threshold at (x, y); the tile repeats in both directions.
    #[inline]
    pub fn sample(&self, x: i64, y: i64) -> f64 {
        let s = self.size as i64;
        let tx = x.rem_euclid(s) as usize;
        let ty = y.rem_euclid(s) as usize;
        self.data[ty * self.size + tx] as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_thresholds_are_an_even_spread() {
        let tile = ThresholdTile::blue_noise(3, 16);
        let mut values: Vec<f32> = tile.data().to_vec();
        values.sort_by(f32::total_cmp);
        let n = values.len();
        for (rank, v) in values.iter().enumerate() {
            let expected = (rank as f64 / (n - 1) as f64 - 0.5) as f32;
            assert_eq!(*v, expected);
        }
        assert_eq!(values[0], -0.5);
        assert_eq!(values[n - 1], 0.5);
    }

    #[test]
    fn test_same_seed_same_tile() {
        assert_eq!(ThresholdTile::blue_noise(9, 8), ThresholdTile::blue_noise(9, 8));
        assert_ne!(ThresholdTile::blue_noise(9, 8), ThresholdTile::blue_noise(10, 8));
    }

    #[test]
    fn test_sampling_wraps() {
        let tile = ThresholdTile::blue_noise(1, 8);
        assert_eq!(tile.sample(-1, 0), tile.sample(7, 0));
        assert_eq!(tile.sample(3, 17), tile.sample(3, 1));
    }

    #[test]
    fn test_neighbors_are_less_correlated_than_white_noise() {
        // Blue noise: adjacent thresholds tend to differ more
        let tile = ThresholdTile::blue_noise(5, DEFAULT_TILE_SIZE);
        let s = tile.size() as i64;
        let mut diff = 0.0;
        for y in 0..s {
            for x in 0..s {
                let here = tile.sample(x, y);
                diff += (here - tile.sample(x + 1, y)).abs();
                diff += (here - tile.sample(x, y + 1)).abs();
            }
        }
        let mean_diff = diff / (2 * s * s) as f64;
        // Uniform white noise on -0.5..0.5 averages 1/3
        assert!(mean_diff > 1.0 / 3.0, "mean neighbor diff {mean_diff}");
    }

    #[test]
    fn test_minimum_size() {
        assert_eq!(ThresholdTile::blue_noise(0, 0).size(), 2);
    }
}
