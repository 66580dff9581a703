//! Region-of-interest detection: object outlines from contours, faces from a cascade model.

use crate::error::ProcessingResult;
use crate::image::blur::gaussian_gray;
use crate::image::color::grayscale;
use crate::image::edges::canny;
use image::{GrayImage, RgbImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;
use serde::Serialize;

/// Smoothing and hysteresis thresholds applied before tracing contours.
const CONTOUR_BLUR_SIZE: u32 = 5;
const CONTOUR_CANNY_LOW: f64 = 50.0;
const CONTOUR_CANNY_HIGH: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Face,
    Contour,
}

/// Axis-aligned bounding box of a detected region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "type")]
    pub kind: RegionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
}

/// Polygon area by the shoelace formula.
fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();
    twice.abs() as f64 / 2.0
}

fn bounding_box(points: &[Point<i32>]) -> Option<(i64, i64, u32, u32)> {
    let min_x = points.iter().map(|p| p.x).min()?;
    let max_x = points.iter().map(|p| p.x).max()?;
    let min_y = points.iter().map(|p| p.y).min()?;
    let max_y = points.iter().map(|p| p.y).max()?;
    Some((
        min_x as i64,
        min_y as i64,
        (max_x - min_x + 1) as u32,
        (max_y - min_y + 1) as u32,
    ))
}

/// Outer contours of the edge map whose enclosed area exceeds `min_area`.
pub fn detect_contours(img: &RgbImage, min_area: f64) -> Vec<Region> {
    let gray = gaussian_gray(&grayscale(img), CONTOUR_BLUR_SIZE, 0.0);
    let edges = canny(&gray, CONTOUR_CANNY_LOW, CONTOUR_CANNY_HIGH);

    find_contours::<i32>(&edges)
        .into_iter()
        .filter(|c| c.parent.is_none() && matches!(c.border_type, BorderType::Outer))
        .filter_map(|c| {
            let area = polygon_area(&c.points);
            if area <= min_area {
                return None;
            }
            let (x, y, width, height) = bounding_box(&c.points)?;
            Some(Region {
                x,
                y,
                width,
                height,
                kind: RegionKind::Contour,
                area: Some(area),
            })
        })
        .collect()
}

/// Detects faces in a grayscale image.
pub trait FaceDetector: Send + Sync {
    fn detect(&self, gray: &GrayImage) -> ProcessingResult<Vec<Region>>;
}

#[cfg(feature = "face-detection")]
pub use cascade::CascadeFaceDetector;

#[cfg(feature = "face-detection")]
mod cascade {
    use super::{FaceDetector, Region, RegionKind};
    use crate::error::{ProcessingError, ProcessingResult};
    use image::GrayImage;
    use std::path::PathBuf;

    const MIN_FACE_SIZE: u32 = 30;
    const PYRAMID_SCALE_FACTOR: f32 = 1.0 / 1.1;
    const SCORE_THRESHOLD: f64 = 2.0;
    const WINDOW_STEP: u32 = 4;

    /// Face detector backed by a `rustface` cascade model file.
    ///
    /// The model is loaded on every call; detectors are not shareable across threads.
    #[derive(Debug, Clone)]
    pub struct CascadeFaceDetector {
        model_path: PathBuf,
    }

    impl CascadeFaceDetector {
        pub fn new(model_path: impl Into<PathBuf>) -> ProcessingResult<Self> {
            let model_path = model_path.into();
            if !model_path.is_file() {
                return Err(ProcessingError::DetectorUnavailable(format!(
                    "model file not found: {}",
                    model_path.display()
                )));
            }
            Ok(Self { model_path })
        }
    }

    impl FaceDetector for CascadeFaceDetector {
        fn detect(&self, gray: &GrayImage) -> ProcessingResult<Vec<Region>> {
            let path = self.model_path.to_string_lossy();
            let mut detector = rustface::create_detector(&path)
                .map_err(|e| ProcessingError::DetectorUnavailable(e.to_string()))?;
            detector.set_min_face_size(MIN_FACE_SIZE);
            detector.set_score_thresh(SCORE_THRESHOLD);
            detector.set_pyramid_scale_factor(PYRAMID_SCALE_FACTOR);
            detector.set_slide_window_step(WINDOW_STEP, WINDOW_STEP);

            let mut image = rustface::ImageData::new(gray.as_raw(), gray.width(), gray.height());
            let faces = detector
                .detect(&mut image)
                .into_iter()
                .map(|face| {
                    let bbox = face.bbox();
                    Region {
                        x: bbox.x() as i64,
                        y: bbox.y() as i64,
                        width: bbox.width(),
                        height: bbox.height(),
                        kind: RegionKind::Face,
                        area: None,
                    }
                })
                .collect();
            Ok(faces)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_missing_model_is_unavailable() {
            let err = CascadeFaceDetector::new("/nonexistent/seeta.bin").unwrap_err();
            assert!(matches!(err, ProcessingError::DetectorUnavailable(_)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn square(size: u32, side: u32) -> RgbImage {
        let start = (size - side) / 2;
        RgbImage::from_fn(size, size, |x, y| {
            let inside = (start..start + side).contains(&x) && (start..start + side).contains(&y);
            if inside {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn test_polygon_area() {
        let points = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 5),
            Point::new(0, 5),
        ];
        assert_eq!(polygon_area(&points), 50.0);
        assert_eq!(polygon_area(&points[..2]), 0.0);
    }

    #[test]
    fn test_flat_image_has_no_contours() {
        let img = RgbImage::from_pixel(64, 64, Rgb([120, 120, 120]));
        assert!(detect_contours(&img, 500.0).is_empty());
    }

    #[test]
    fn test_square_is_detected() {
        let regions = detect_contours(&square(120, 50), 500.0);
        assert!(!regions.is_empty());
        for region in &regions {
            assert_eq!(region.kind, RegionKind::Contour);
            assert!(region.area.unwrap() > 500.0);
            assert!(region.x >= 30 && region.x <= 40, "x = {}", region.x);
            assert!(region.width >= 45 && region.width <= 60, "width = {}", region.width);
        }
    }

    #[test]
    fn test_min_area_filters_everything_small() {
        assert!(detect_contours(&square(120, 50), 100_000.0).is_empty());
    }

    #[test]
    fn test_region_serializes_type() {
        let region = Region {
            x: 1,
            y: 2,
            width: 3,
            height: 4,
            kind: RegionKind::Face,
            area: None,
        };
        let json = serde_json::to_value(&region).unwrap();
        assert_eq!(json["type"], "face");
        assert!(json.get("area").is_none());
    }
}
