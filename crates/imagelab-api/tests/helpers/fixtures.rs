//! Test fixtures: encoded images built with the `image` crate.

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Solid-color RGB image encoded in `format`.
pub fn solid_image(width: u32, height: u32, color: [u8; 3], format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("encode fixture");
    buffer
}

/// 100x100 pure red PNG.
pub fn red_png() -> Vec<u8> {
    solid_image(100, 100, [255, 0, 0], ImageFormat::Png)
}

/// White square on black, large enough for contour detection.
pub fn square_png() -> Vec<u8> {
    let img = RgbImage::from_fn(120, 120, |x, y| {
        if (35..85).contains(&x) && (35..85).contains(&y) {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("encode fixture");
    buffer
}
