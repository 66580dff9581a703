//! Error types module
//!
//! This module provides the application-level error type used at the service boundary.
//! Crate-local errors (`ProcessingError`, `StorageError`) are mapped
//! into `AppError` before they reach the HTTP layer.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues such as undecodable images
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNKNOWN_OPERATION")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::ImageProcessing(_) => (
            422,
            "IMAGE_PROCESSING_ERROR",
            false,
            Some("Check the operation parameters or try a different image"),
            false,
            LogLevel::Warn,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::BadRequest(_) => (
            400,
            "BAD_REQUEST",
            false,
            Some("Check request format and parameters"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the file name exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size or upload fewer files"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnknownOperation(_) => (
            400,
            "UNKNOWN_OPERATION",
            false,
            Some("List available operations with GET /api/operations"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnknownPreset(_) => (
            400,
            "UNKNOWN_PRESET",
            false,
            Some("List available presets with GET /api/presets"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidParameter(_) => (
            400,
            "INVALID_PARAMETER",
            false,
            Some("Check the parameter schema returned by GET /api/operations"),
            false,
            LogLevel::Debug,
        ),
        AppError::Unavailable(_) => (
            503,
            "SERVICE_UNAVAILABLE",
            false,
            Some("This feature is not configured on the server"),
            false,
            LogLevel::Warn,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Storage(_) => "Storage",
            AppError::ImageProcessing(_) => "ImageProcessing",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::UnknownOperation(_) => "UnknownOperation",
            AppError::UnknownPreset(_) => "UnknownPreset",
            AppError::InvalidParameter(_) => "InvalidParameter",
            AppError::Unavailable(_) => "Unavailable",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::ImageProcessing(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::UnknownOperation(ref name) => format!("Unknown operation: {}", name),
            AppError::UnknownPreset(ref name) => format!("Unknown preset: {}", name),
            AppError::InvalidParameter(ref msg) => msg.clone(),
            AppError::Unavailable(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Image not found: cat.png".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Image not found: cat.png");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_unknown_operation() {
        let err = AppError::UnknownOperation("swirl".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "UNKNOWN_OPERATION");
        assert_eq!(err.client_message(), "Unknown operation: swirl");
        assert_eq!(err.error_type(), "UnknownOperation");
    }

    #[test]
    fn test_error_metadata_processing_failure() {
        let err = AppError::ImageProcessing("kernel size must be positive".to_string());
        assert_eq!(err.http_status_code(), 422);
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert!(!err.is_sensitive());
    }

    #[test]
    fn test_internal_errors_are_sensitive() {
        let err = AppError::Internal("disk full".to_string());
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Internal server error");

        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_type(), "Internal");
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let source = anyhow::anyhow!("root cause").context("outer context");
        let err = AppError::InternalWithSource {
            message: "wrapped".to_string(),
            source,
        };
        let details = err.detailed_message();
        assert!(details.contains("Caused by: outer context"));
    }
}
