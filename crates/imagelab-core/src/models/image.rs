use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decoded properties of a stored image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    /// Upper-case container name, e.g. "PNG" or "JPEG".
    pub format: String,
    /// Pixel layout, e.g. "RGB", "RGBA" or "L".
    pub mode: String,
    pub size_bytes: u64,
}

impl ImageMetadata {
    pub fn has_transparency(&self) -> bool {
        self.mode.ends_with('A')
    }

    /// Width over height, rounded to two decimals.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        (self.width as f64 / self.height as f64 * 100.0).round() / 100.0
    }
}

/// An accepted upload in the gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredImage {
    /// Generated unique name; the only identity callers hold.
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    pub metadata: ImageMetadata,
    pub upload_time: DateTime<Utc>,
}

/// Detailed view of a single stored image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    pub filename: String,
    #[serde(flatten)]
    pub metadata: ImageMetadata,
    pub aspect_ratio: f64,
    pub has_transparency: bool,
    pub upload_time: DateTime<Utc>,
}

impl From<StoredImage> for ImageInfo {
    fn from(image: StoredImage) -> Self {
        Self {
            filename: image.filename,
            aspect_ratio: image.metadata.aspect_ratio(),
            has_transparency: image.metadata.has_transparency(),
            metadata: image.metadata,
            upload_time: image.upload_time,
        }
    }
}
