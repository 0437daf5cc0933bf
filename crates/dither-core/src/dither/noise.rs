//! Pixel-deterministic hash noise
//!
//! The same `(seed, x, y, offset)` always yields the same value, so random
//! dither patterns are reproducible from the seed alone.

/// Offsets separating the noise streams of the random dither families.
pub const OFFSET_BW: u32 = 0x0000_0b57;
pub const OFFSET_GRAYSCALE: u32 = 0x0000_6a7e;
/// Per-channel streams use `offset + channel`.
pub const OFFSET_RGB: u32 = 0x0001_2a00;
pub const OFFSET_COLOR: u32 = 0x0002_c010;
pub const OFFSET_TILE: u32 = 0x0003_b1e0;

/// 32-bit integer finalizer with low bias (Chris Wellons' `lowbias32`).
#[inline]
fn mix(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

/// Deterministic noise in 0.0..1.0.
#[inline]
pub fn noise_hash(seed: u32, x: i64, y: i64, offset: u32) -> f64 {
    let mut h = mix(seed ^ 0x9e37_79b9);
    h = mix(h ^ x as u32);
    h = mix(h ^ y as u32);
    h = mix(h ^ offset);
    h as f64 / 4_294_967_296.0
}

/// Seeds arrive as floating point from configs; non-finite or negative
/// values become 0, the rest are truncated.
pub fn normalize_seed(seed: f64) -> u32 {
    if seed.is_finite() && seed > 0.0 {
        (seed.floor() as u64 & 0xffff_ffff) as u32
    } else {
        0
    }
}
