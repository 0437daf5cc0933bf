//! Assertion helpers for tests.

use std::path::Path;

use dither_core::{PixelBuffer, Rgb8};
use ditherlab::image_io;
use pretty_assertions::assert_eq;

/// Assert `path` holds a PNG of the given size and return it
pub fn assert_png_size(path: &Path, width: usize, height: usize) -> PixelBuffer {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG signature in {}, got {:?}",
        path.display(),
        &bytes[..8.min(bytes.len())]
    );
    let image = image_io::decode_png(&bytes).expect("decode png");
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "Unexpected size of {}",
        path.display()
    );
    image
}

/// Assert every pixel of `image` is one of `colors`
pub fn assert_only_colors(image: &PixelBuffer, colors: &[Rgb8]) {
    for y in 0..image.height() {
        for x in 0..image.width() {
            let c = image.get(x, y);
            assert!(
                colors.contains(&c),
                "Pixel ({x}, {y}) is {} which is not in the palette",
                c.to_hex()
            );
        }
    }
}
