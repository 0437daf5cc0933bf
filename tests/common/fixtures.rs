//! Test fixtures: palette texts, configs and source images.

use std::path::{Path, PathBuf};

use dither_core::{PixelBuffer, Rgb8};
use ditherlab::image_io;

/// Four-color palette split over two rows
pub const FOUR_COLOR_PALETTE: &str = "\
// test palette
#000000 #ffffff
-----
#e03020, #2040e0
";

/// Config rendering a small gradient with every stage enabled
pub const GRADIENT_CONFIG: &str = r##"
palette:
  file: palette.txt
  space: oklab
source:
  kind: gradient
  width: 24
  height: 12
  points:
    - color: "#ff0000"
    - color: "#00ff00"
    - color: "#0000ff"
    - color: "#ffffff"
pipeline:
  gamut:
    enabled: true
  dither:
    kind: blue-noise
    strength: 0.6
    seed: 5
  stages:
    - source
    - gamut-adjusted
    - dithered
    - reduced
    - palette-error
    - palette-ambiguity
    - palette-modulation
    - perceptual-delta
"##;

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

/// Horizontal gray ramp
pub fn gray_ramp(width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, _| {
        let v = (x * 255 / (width - 1).max(1)) as u8;
        Rgb8::new(v, v, v)
    })
}

/// Single-color image
pub fn solid(width: usize, height: usize, color: Rgb8) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |_, _| color)
}

/// Write `image` as a PNG into `dir/name` and return the path.
pub fn write_image(dir: &Path, name: &str, image: &PixelBuffer) -> PathBuf {
    let path = dir.join(name);
    image_io::write_png(&path, image).expect("write png fixture");
    path
}
