//! Color-space and per-pixel arithmetic transforms

use crate::error::{ProcessingError, ProcessingResult};
use crate::image::kernel::saturate;
use image::{GrayImage, Luma, Rgb, RgbImage};

/// BT.601 luma in integer arithmetic, rounded.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

pub fn grayscale(img: &RgbImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let Rgb([r, g, b]) = *img.get_pixel(x, y);
        Luma([luma(r, g, b)])
    })
}

/// Replicate intensity into three equal channels.
pub fn expand_gray(img: &GrayImage) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let v = img.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn parse(name: &str) -> ProcessingResult<Self> {
        match name {
            "red" | "r" => Ok(Channel::Red),
            "green" | "g" => Ok(Channel::Green),
            "blue" | "b" => Ok(Channel::Blue),
            other => Err(ProcessingError::invalid_param(
                "channel",
                format!("unknown channel '{}'", other),
            )),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Keep one channel and zero the other two.
pub fn extract_channel(img: &RgbImage, channel: Channel) -> RgbImage {
    let keep = channel.index();
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        for c in 0..3 {
            if c != keep {
                pixel[c] = 0;
            }
        }
    }
    out
}

/// `v * alpha + beta`, clamped per pixel.
pub fn contrast_brightness(img: &RgbImage, alpha: f64, beta: f64) -> RgbImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        for c in pixel.0.iter_mut() {
            *c = saturate((*c as f64 * alpha + beta) as f32);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_of_primaries() {
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
        assert_eq!(luma(255, 255, 255), 255);
    }

    #[test]
    fn test_grayscale_then_expand_gives_equal_channels() {
        let img = RgbImage::from_fn(7, 5, |x, y| Rgb([(x * 30) as u8, (y * 50) as u8, 90]));
        let expanded = expand_gray(&grayscale(&img));

        assert_eq!(expanded.dimensions(), img.dimensions());
        for pixel in expanded.pixels() {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
    }

    #[test]
    fn test_extract_red_zeroes_other_channels() {
        let img = RgbImage::from_fn(6, 6, |x, y| Rgb([(x * 40 + y) as u8, 100, 200]));
        let red = extract_channel(&img, Channel::Red);

        for (src, out) in img.pixels().zip(red.pixels()) {
            assert_eq!(out[0], src[0]);
            assert_eq!(out[1], 0);
            assert_eq!(out[2], 0);
        }
    }

    #[test]
    fn test_extract_blue_keeps_blue() {
        let img = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        let blue = extract_channel(&img, Channel::Blue);
        assert_eq!(blue.get_pixel(0, 0), &Rgb([0, 0, 3]));
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!(Channel::parse("green").unwrap(), Channel::Green);
        assert_eq!(Channel::parse("b").unwrap(), Channel::Blue);
        assert!(Channel::parse("alpha").is_err());
    }

    #[test]
    fn test_contrast_brightness_clamps() {
        let img = RgbImage::from_pixel(1, 1, Rgb([10, 128, 250]));
        let out = contrast_brightness(&img, 2.0, 10.0);
        assert_eq!(out.get_pixel(0, 0), &Rgb([30, 255, 255]));

        let out = contrast_brightness(&img, 1.0, -50.0);
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 78, 200]));

        assert_eq!(contrast_brightness(&img, 1.0, 0.0), img);
    }
}
