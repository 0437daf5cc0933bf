//! Reduction palette with precomputed distance coordinates.
//!
//! Every entry stores its coordinates in the active distance space once, at
//! construction, so per-pixel matching is a linear scan of squared Euclidean
//! distances. Ties go to the first entry in palette order.

use serde::Serialize;

use crate::color::{coords_distance_squared, rgb_distance_coords, ColorSpace, Rgb, Rgb8};

/// One palette color with its coordinates in the distance space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteEntry {
    pub rgb: Rgb,
    pub coords: [f64; 4],
}

/// Result of snapping a color to the palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantized {
    /// Position of the winning entry in palette order
    pub index: usize,
    pub rgb: Rgb,
}

/// Distances from a color to its two closest palette entries.
///
/// Distances are Euclidean in the palette's distance space (not squared).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSummary {
    pub nearest_index: usize,
    pub nearest_distance: f64,
    /// `None` for single-entry palettes
    pub second_nearest_distance: Option<f64>,
}

/// A fixed palette for nearest-color reduction.
///
/// # Example
///
/// ```
/// use dither_core::{ColorSpace, ReductionPalette, Rgb, Rgb8};
///
/// let palette = ReductionPalette::new(&[Rgb8::new(0, 0, 0), Rgb8::new(255, 255, 255)], ColorSpace::Rgb);
/// let q = palette.quantize(Rgb::new(200.0, 200.0, 200.0)).unwrap();
/// assert_eq!(q.index, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ReductionPalette {
    space: ColorSpace,
    entries: Vec<PaletteEntry>,
    reference_scale: f64,
}

impl ReductionPalette {
    /// Build a palette measuring distances in `space`.
    ///
    /// An empty color list is accepted; such a palette quantizes nothing.
    pub fn new(colors: &[Rgb8], space: ColorSpace) -> Self {
        if colors.is_empty() {
            tracing::warn!("Empty reduction palette, colors pass through unquantized");
        }
        let entries = colors
            .iter()
            .map(|&c| {
                let rgb = Rgb::from(c);
                PaletteEntry {
                    rgb,
                    coords: rgb_distance_coords(rgb.to_unit(), space),
                }
            })
            .collect();

        let black = rgb_distance_coords([0.0, 0.0, 0.0], space);
        let white = rgb_distance_coords([1.0, 1.0, 1.0], space);
        let span = coords_distance_squared(&black, &white).sqrt();

        Self {
            space,
            entries,
            reference_scale: if span > 0.0 { span } else { 1.0 },
        }
    }

    #[inline]
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Black-to-white distance in the distance space, used to normalize
    /// palette error into roughly 0..=1.
    #[inline]
    pub fn reference_scale(&self) -> f64 {
        self.reference_scale
    }

    /// Coordinates of a pipeline color in the distance space.
    ///
    /// The color is clamped to the displayable range first; jitter and
    /// diffused error can push it outside.
    pub fn coords_of(&self, rgb: Rgb) -> [f64; 4] {
        rgb_distance_coords(rgb.clamped().to_unit(), self.space)
    }

    /// Snap `rgb` to the nearest entry, or `None` for an empty palette.
    pub fn quantize(&self, rgb: Rgb) -> Option<Quantized> {
        let coords = self.coords_of(rgb);
        let (index, _) = self.nearest(&coords)?;
        Some(Quantized {
            index,
            rgb: self.entries[index].rgb,
        })
    }

    /// Nearest and second-nearest distances, or `None` for an empty palette.
    pub fn summarize_distances(&self, rgb: Rgb) -> Option<DistanceSummary> {
        let coords = self.coords_of(rgb);
        let mut best: Option<(usize, f64)> = None;
        let mut second: Option<f64> = None;

        for (i, entry) in self.entries.iter().enumerate() {
            let d = coords_distance_squared(&coords, &entry.coords);
            match best {
                Some((_, best_d)) if d >= best_d => {
                    if second.map_or(true, |s| d < s) {
                        second = Some(d);
                    }
                }
                Some((_, best_d)) => {
                    second = Some(best_d);
                    best = Some((i, d));
                }
                None => best = Some((i, d)),
            }
        }

        best.map(|(index, d)| DistanceSummary {
            nearest_index: index,
            nearest_distance: d.sqrt(),
            second_nearest_distance: second.map(f64::sqrt),
        })
    }

    /// Index and squared distance of the first entry at minimal distance.
    fn nearest(&self, coords: &[f64; 4]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, entry) in self.entries.iter().enumerate() {
            let d = coords_distance_squared(coords, &entry.coords);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        best
    }
}

/// How often each palette entry was chosen during a render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaletteUsage {
    pub counts: Vec<u64>,
    pub total: u64,
}

impl PaletteUsage {
    pub fn new(len: usize) -> Self {
        Self {
            counts: vec![0; len],
            total: 0,
        }
    }

    #[inline]
    pub fn record(&mut self, index: usize) {
        if let Some(count) = self.counts.get_mut(index) {
            *count += 1;
            self.total += 1;
        }
    }

    /// Share of pixels that went to `index`, 0.0 when nothing was recorded.
    pub fn fraction(&self, index: usize) -> f64 {
        match self.counts.get(index) {
            Some(&count) if self.total > 0 => count as f64 / self.total as f64,
            _ => 0.0,
        }
    }

    /// Number of entries chosen at least once.
    pub fn used(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Indices of entries never chosen.
    pub fn unused(&self) -> Vec<usize> {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == 0)
            .map(|(i, _)| i)
            .collect()
    }
}
