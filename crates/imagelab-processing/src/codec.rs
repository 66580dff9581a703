//! Decoding and encoding between stored bytes and pixel buffers

use crate::error::{ProcessingError, ProcessingResult};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::io::Cursor;

/// Decode encoded bytes of any supported format.
pub fn decode(data: &[u8]) -> ProcessingResult<DynamicImage> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::Decode(image::ImageError::IoError(e)))?
        .decode()
        .map_err(ProcessingError::Decode)
}

/// Output format implied by a file name's extension.
pub fn format_for_filename(filename: &str) -> ProcessingResult<ImageFormat> {
    ImageFormat::from_path(filename)
        .map_err(|_| ProcessingError::UnsupportedFormat(filename.to_string()))
}

/// Encode a buffer, adapting the pixel layout to what the target format can store.
pub fn encode(image: &DynamicImage, format: ImageFormat) -> ProcessingResult<Vec<u8>> {
    let prepared: Cow<'_, DynamicImage> = match format {
        ImageFormat::Jpeg if image.color().has_alpha() => {
            Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8()))
        }
        ImageFormat::Gif if !image.color().has_color() => {
            Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8()))
        }
        _ => Cow::Borrowed(image),
    };

    let mut buffer = Vec::with_capacity((image.width() * image.height()) as usize);
    prepared
        .write_to(&mut Cursor::new(&mut buffer), format)
        .map_err(ProcessingError::Encode)?;
    Ok(buffer)
}

pub fn encode_png(image: &DynamicImage) -> ProcessingResult<Vec<u8>> {
    encode(image, ImageFormat::Png)
}
