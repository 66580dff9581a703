use imagelab_storage::StorageError;

/// Failures raised while validating, transforming or analysing images.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Too many files: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Face detection unavailable: {0}")]
    DetectorUnavailable(String),

    #[error("Archive creation failed: {0}")]
    Archive(String),

    #[error("Processing task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ProcessingError {
    pub(crate) fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        ProcessingError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;
