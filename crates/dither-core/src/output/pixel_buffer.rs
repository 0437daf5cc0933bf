//! Owned RGBA8888 pixel buffer.

use crate::color::{Rgb, Rgb8};

/// A `width × height` RGBA8888 image in row-major order.
///
/// # Example
///
/// ```
/// use dither_core::{PixelBuffer, Rgb8};
///
/// let mut image = PixelBuffer::new(2, 2);
/// image.set(1, 0, Rgb8::new(255, 0, 0));
/// assert_eq!(image.get(1, 0), Rgb8::new(255, 0, 0));
/// assert_eq!(image.data().len(), 2 * 2 * 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Opaque black buffer.
    pub fn new(width: usize, height: usize) -> Self {
        let mut data = vec![0; width * height * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap existing RGBA bytes. `None` when the length does not match.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Expand packed RGB bytes. `None` when the length does not match.
    pub fn from_rgb(width: usize, height: usize, rgb: &[u8]) -> Option<Self> {
        if rgb.len() != width * height * 3 {
            return None;
        }
        let mut data = Vec::with_capacity(width * height * 4);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb8) -> Self {
        let mut image = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                image.set(x, y, f(x, y));
            }
        }
        image
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Color at (x, y). Alpha is ignored.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb8 {
        let i = (y * self.width + x) * 4;
        Rgb8::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Pipeline color at (x, y).
    #[inline]
    pub fn get_rgb(&self, x: usize, y: usize) -> Rgb {
        Rgb::from(self.get(x, y))
    }

    /// Overwrite (x, y) with an opaque color.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb8) {
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
    }

    /// Packed RGB bytes without alpha.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.len() * 3);
        for px in self.data.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
        rgb
    }

    /// Every pixel as unit-range RGB, row-major.
    pub fn to_unit_pixels(&self) -> Vec<[f64; 3]> {
        self.data
            .chunks_exact(4)
            .map(|px| [px[0] as f64 / 255.0, px[1] as f64 / 255.0, px[2] as f64 / 255.0])
            .collect()
    }
}
