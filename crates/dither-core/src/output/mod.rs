//! Output types for the pipeline.
//!
//! [`PixelBuffer`] is the RGBA8888 buffer handed in as a source and handed
//! back for every preview stage.

mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;
