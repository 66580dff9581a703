//! Constants shared across crates

/// Extensions accepted for uploads when `ALLOWED_EXTENSIONS` is not set.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp"];

pub const DEFAULT_MAX_FILE_SIZE_MB: usize = 16;
pub const DEFAULT_MAX_FILES_PER_UPLOAD: usize = 10;
pub const DEFAULT_SERVER_PORT: u16 = 5000;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_PROCESSED_DIR: &str = "processed";

/// Minimum contour area (in pixels) reported by region detection.
pub const DEFAULT_MIN_REGION_AREA: f64 = 500.0;

pub const BYTES_PER_MB: usize = 1024 * 1024;
