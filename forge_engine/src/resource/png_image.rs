/// PNG decoding for texture loading
///
/// Decodes to tightly packed 8-bit rows ordered bottom-up, which is the row
/// order texture uploads expect (texture coordinate origin at the bottom left).

use std::io::Cursor;

use crate::error::{Error, Result};
use crate::graphics_device::PixelFormat;

/// First eight bytes of every PNG file
pub(crate) const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decoded image ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Rows of `width * channels` bytes, last image row first
    pub pixels: Vec<u8>,
}

/// Decode a PNG file
///
/// Palette images are expanded to RGB (RGBA with transparency), grayscale
/// below 8 bits is expanded to 8 bits and 16-bit channels are stripped to 8.
pub(crate) fn decode_png(bytes: &[u8]) -> Result<DecodedImage> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(Error::InvalidResource("File does not contain a valid PNG image".to_string()));
    }

    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| Error::InvalidResource(format!("Error(s) occurred while reading the PNG header: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != png::BitDepth::Eight {
        return Err(Error::InvalidResource(format!("Unsupported image depth size: {:?}", bit_depth)));
    }

    let channels = color_type.samples();
    let format = PixelFormat::from_channels(channels).ok_or_else(|| {
        Error::InvalidResource(format!("Unsupported number of channels: {}", channels))
    })?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let stride = width as usize * channels;

    let mut buffer = vec![0u8; stride * height as usize];
    let frame = reader
        .next_frame(&mut buffer)
        .map_err(|e| Error::InvalidResource(format!("Error(s) occurred while reading the PNG data: {}", e)))?;

    // Flip rows so the first row in memory is the bottom of the image
    let mut pixels = Vec::with_capacity(stride * height as usize);
    for row in buffer.chunks_exact(frame.line_size).take(height as usize).rev() {
        pixels.extend_from_slice(&row[..stride]);
    }

    Ok(DecodedImage {
        width,
        height,
        format,
        pixels,
    })
}

#[cfg(test)]
#[path = "png_image_tests.rs"]
mod tests;
