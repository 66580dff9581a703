//! API constants

/// Prefix for every JSON and file route except the index and health check.
pub const API_PREFIX: &str = "/api";

/// Version reported by the index route.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Multipart field that carries uploaded files.
pub const UPLOAD_FIELD: &str = "files";

/// Name of the archive returned by batch downloads.
pub const BATCH_ARCHIVE_NAME: &str = "images.zip";

/// Response header listing requested files that were not found for a batch download.
pub const MISSING_FILES_HEADER: &str = "x-missing-files";
