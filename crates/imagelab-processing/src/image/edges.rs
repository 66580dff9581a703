//! Edge detectors. All take and return single-channel images.
//!
//! Sobel, Prewitt and Laplacian responses come from `imageproc`; Roberts has no 2x2
//! counterpart there and runs through the local convolution engine.

use crate::image::kernel::{saturate, Kernel, Plane};
use image::{GrayImage, Luma};
use imageproc::definitions::Image;
use imageproc::filter::laplacian_filter;
use imageproc::gradients::{horizontal_prewitt, horizontal_sobel, vertical_prewitt, vertical_sobel};

pub const DEFAULT_CANNY_LOW: i64 = 50;
pub const DEFAULT_CANNY_HIGH: i64 = 150;

/// Canny with hysteresis thresholds. Inverted thresholds are swapped.
pub fn canny(img: &GrayImage, low: f64, high: f64) -> GrayImage {
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    imageproc::edges::canny(img, low as f32, high as f32)
}

/// Euclidean magnitude of two signed gradient images, saturated to `u8`.
fn magnitude(gx: &Image<Luma<i16>>, gy: &Image<Luma<i16>>) -> GrayImage {
    GrayImage::from_fn(gx.width(), gx.height(), |x, y| {
        let a = gx.get_pixel(x, y)[0] as f32;
        let b = gy.get_pixel(x, y)[0] as f32;
        Luma([saturate((a * a + b * b).sqrt())])
    })
}

pub fn roberts(img: &GrayImage) -> GrayImage {
    let plane = Plane::from_gray(img);
    let gx = plane.convolve(&Kernel::from_rows([[1.0, 0.0], [0.0, -1.0]]));
    let gy = plane.convolve(&Kernel::from_rows([[0.0, 1.0], [-1.0, 0.0]]));
    gx.zip_map(&gy, |a, b| (a * a + b * b).sqrt()).to_gray()
}

pub fn sobel(img: &GrayImage) -> GrayImage {
    magnitude(&horizontal_sobel(img), &vertical_sobel(img))
}

pub fn prewitt(img: &GrayImage) -> GrayImage {
    magnitude(&horizontal_prewitt(img), &vertical_prewitt(img))
}

/// Absolute 4-neighbour Laplacian response.
pub fn laplacian(img: &GrayImage) -> GrayImage {
    let response = laplacian_filter(img);
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([saturate((response.get_pixel(x, y)[0] as f32).abs())])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn vertical_edge() -> GrayImage {
        GrayImage::from_fn(10, 10, |x, _| Luma([if x < 5 { 0 } else { 100 }]))
    }

    #[test]
    fn test_flat_image_has_no_edges() {
        let img = GrayImage::from_pixel(8, 8, Luma([128]));
        for out in [roberts(&img), sobel(&img), prewitt(&img), laplacian(&img)] {
            assert!(out.pixels().all(|p| p[0] == 0));
        }
        assert!(canny(&img, 50.0, 150.0).pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_sobel_magnitude_at_vertical_edge() {
        let out = sobel(&vertical_edge());
        // Columns 4 and 5 straddle the step: |gx| = 4 * 100.
        assert_eq!(out.get_pixel(4, 5)[0], 255);
        assert_eq!(out.get_pixel(5, 5)[0], 255);
        assert_eq!(out.get_pixel(1, 5)[0], 0);
        assert_eq!(out.get_pixel(8, 5)[0], 0);
    }

    #[test]
    fn test_prewitt_magnitude_at_vertical_edge() {
        let out = prewitt(&vertical_edge());
        assert_eq!(out.get_pixel(4, 5)[0], 255);
        assert_eq!(out.get_pixel(0, 5)[0], 0);
    }

    #[test]
    fn test_roberts_responds_on_the_step() {
        let out = roberts(&vertical_edge());
        // Diagonal differences across the step: sqrt(100^2 + 100^2).
        assert_eq!(out.get_pixel(5, 5)[0], 141);
        assert_eq!(out.get_pixel(2, 5)[0], 0);
    }

    #[test]
    fn test_laplacian_is_absolute() {
        let out = laplacian(&vertical_edge());
        assert_eq!(out.get_pixel(4, 5)[0], 100);
        assert_eq!(out.get_pixel(5, 5)[0], 100);
    }

    #[test]
    fn test_canny_swaps_inverted_thresholds() {
        let img = vertical_edge();
        assert_eq!(canny(&img, 150.0, 50.0), canny(&img, 50.0, 150.0));
    }

    #[test]
    fn test_canny_finds_step() {
        let out = canny(&vertical_edge(), 50.0, 150.0);
        assert!(out.pixels().any(|p| p[0] == 255));
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }
}
