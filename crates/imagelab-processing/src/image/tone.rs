//! Tonal range adjustments: normalization, histogram equalization and stretching.

use crate::image::color::luma;
use crate::image::kernel::saturate;
use image::{GrayImage, Luma, RgbImage};

/// Linearly map the global min..max across all channels onto 0..255.
pub fn normalize(img: &RgbImage) -> RgbImage {
    let raw = img.as_raw();
    let (min, max) = match (raw.iter().min(), raw.iter().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => return img.clone(),
    };
    if min == max {
        return img.clone();
    }
    let scale = 255.0 / (max - min) as f32;
    let mut out = img.clone();
    for v in out.iter_mut() {
        *v = saturate((*v - min) as f32 * scale);
    }
    out
}

/// Equalize the luma histogram and shift each pixel by its luma change, which keeps
/// chroma (the YCrCb color difference) intact.
pub fn equalize(img: &RgbImage) -> RgbImage {
    let y = GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        Luma([luma(p[0], p[1], p[2])])
    });
    let equalized = imageproc::contrast::equalize_histogram(&y);

    let mut out = img.clone();
    for (x, yy, pixel) in out.enumerate_pixels_mut() {
        let shift = equalized.get_pixel(x, yy)[0] as f32 - y.get_pixel(x, yy)[0] as f32;
        for c in pixel.0.iter_mut() {
            *c = saturate(*c as f32 + shift);
        }
    }
    out
}

/// Stretch each channel independently from its own min..max onto 0..255.
/// A channel with a single value passes through untouched.
pub fn stretch(img: &RgbImage) -> RgbImage {
    let mut bounds = [(u8::MAX, u8::MIN); 3];
    for pixel in img.pixels() {
        for (c, bound) in bounds.iter_mut().enumerate() {
            bound.0 = bound.0.min(pixel[c]);
            bound.1 = bound.1.max(pixel[c]);
        }
    }

    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        for (c, &(min, max)) in bounds.iter().enumerate() {
            if max > min {
                let v = (pixel[c] - min) as u32 * 255 / (max - min) as u32;
                pixel[c] = v as u8;
            }
        }
    }
    out
}
