use image::{GrayImage, Luma};

/// Neighborhood size for adaptive thresholding.
pub const ADAPTIVE_BLOCK_SIZE: u32 = 11;
/// Offset subtracted from the local mean.
pub const ADAPTIVE_C: f64 = 2.0;

/// `v >= t` becomes 255, everything else 0.
pub fn binary(img: &GrayImage, t: i64) -> GrayImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        pixel[0] = if pixel[0] as i64 >= t { 255 } else { 0 };
    }
    out
}

/// Local-mean thresholding: a pixel is white when it exceeds the rounded mean of its
/// `block x block` neighborhood minus `c`. Borders replicate the edge pixel.
pub fn adaptive_mean(img: &GrayImage, block: u32, c: f64) -> GrayImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img.clone();
    }
    let radius = (block / 2) as i64;
    let area = ((2 * radius + 1) * (2 * radius + 1)) as f64;
    let clamp = |v: i64, len: u32| v.clamp(0, len as i64 - 1) as u32;

    // Horizontal window sums, then vertical sums of those.
    let mut rows = vec![0u32; (w * h) as usize];
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0u32;
            for dx in -radius..=radius {
                sum += img.get_pixel(clamp(x as i64 + dx, w), y)[0] as u32;
            }
            rows[(y * w + x) as usize] = sum;
        }
    }

    GrayImage::from_fn(w, h, |x, y| {
        let mut sum = 0u32;
        for dy in -radius..=radius {
            sum += rows[(clamp(y as i64 + dy, h) * w + x) as usize];
        }
        let mean = (sum as f64 / area).round();
        let v = img.get_pixel(x, y)[0] as f64;
        Luma([if v > mean - c { 255 } else { 0 }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_threshold_is_inclusive() {
        let img = GrayImage::from_fn(3, 1, |x, _| Luma([[126, 127, 128][x as usize]]));
        let out = binary(&img, 127);
        assert_eq!(out.as_raw(), &vec![0, 255, 255]);
    }

    #[test]
    fn test_binary_threshold_of_red_luma_is_black() {
        let img = GrayImage::from_pixel(10, 10, Luma([76]));
        assert!(binary(&img, 127).pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_adaptive_on_flat_image_is_white() {
        let img = GrayImage::from_pixel(20, 20, Luma([90]));
        let out = adaptive_mean(&img, ADAPTIVE_BLOCK_SIZE, ADAPTIVE_C);
        assert!(out.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_adaptive_marks_dark_spot() {
        let mut img = GrayImage::from_pixel(21, 21, Luma([200]));
        img.put_pixel(10, 10, Luma([20]));
        let out = adaptive_mean(&img, ADAPTIVE_BLOCK_SIZE, ADAPTIVE_C);
        assert_eq!(out.get_pixel(10, 10)[0], 0);
        assert_eq!(out.get_pixel(0, 0)[0], 255);
    }

    #[test]
    fn test_adaptive_output_is_binary() {
        let img = GrayImage::from_fn(30, 30, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]));
        let out = adaptive_mean(&img, ADAPTIVE_BLOCK_SIZE, ADAPTIVE_C);
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }
}
