//! PNG decoding and encoding for pixel buffers

use std::io::Cursor;
use std::path::Path;

use dither_core::PixelBuffer;

use crate::error::LabError;

/// Decode PNG bytes into an RGBA8888 buffer.
///
/// Palette, grayscale and 16-bit images are expanded to 8-bit RGBA.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, LabError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];
    let (width, height) = (info.width as usize, info.height as usize);

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(LabError::UnsupportedPng(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    PixelBuffer::from_rgba(width, height, rgba).ok_or_else(|| {
        LabError::UnsupportedPng(format!("unexpected data size for {width}x{height}"))
    })
}

/// Encode a buffer as an 8-bit RGBA PNG.
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, LabError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, image.width() as u32, image.height() as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.data())?;
        writer.finish()?;
    }
    Ok(out)
}

pub fn read_png(path: &Path) -> Result<PixelBuffer, LabError> {
    let bytes = std::fs::read(path).map_err(|e| LabError::io(path, e))?;
    let image = decode_png(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Decoded PNG"
    );
    Ok(image)
}

pub fn write_png(path: &Path, image: &PixelBuffer) -> Result<(), LabError> {
    let bytes = encode_png(image)?;
    std::fs::write(path, &bytes).map_err(|e| LabError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dither_core::Rgb8;
    use pretty_assertions::assert_eq;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_rgba_survives_encode_and_decode() {
        let image = PixelBuffer::from_fn(3, 2, |x, y| Rgb8::new(x as u8 * 80, y as u8 * 100, 7));
        let decoded = decode_png(&encode_png(&image).unwrap()).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_grayscale_is_expanded() {
        let bytes = encode_raw(2, 1, png::ColorType::Grayscale, &[10, 200]);
        let image = decode_png(&bytes).unwrap();
        assert_eq!(image.get(0, 0), Rgb8::new(10, 10, 10));
        assert_eq!(image.get(1, 0), Rgb8::new(200, 200, 200));
    }

    #[test]
    fn test_rgb_gets_opaque_alpha() {
        let bytes = encode_raw(1, 1, png::ColorType::Rgb, &[1, 2, 3]);
        let image = decode_png(&bytes).unwrap();
        assert_eq!(image.data(), &[1, 2, 3, 255]);
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        assert!(matches!(
            decode_png(b"not a png"),
            Err(LabError::PngDecode(_))
        ));
    }
}
