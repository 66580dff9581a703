use imagelab_core::Config;
use std::io::Cursor;
use std::path::Path;

/// Reasons an upload is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Missing file extension: {0}")]
    MissingExtension(String),

    #[error("Empty file")]
    EmptyFile,

    #[error("Not a valid image: {0}")]
    InvalidImage(String),
}

/// Outcome of validating one upload. Every check runs; all failures are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable error strings, one per failed check.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Upload validator
///
/// Checks extension, size and decodability independently so a client sees every
/// problem with a file at once.
#[derive(Debug, Clone)]
pub struct ImageValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl ImageValidator {
    pub fn new(max_file_size: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_file_size_bytes, config.allowed_extensions.clone())
    }

    /// Whether `filename` carries one of the allowed extensions.
    pub fn has_allowed_extension(&self, filename: &str) -> bool {
        self.validate_extension(filename).is_ok()
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    /// Validate that the bytes decode as an image.
    pub fn validate_content(&self, data: &[u8]) -> Result<(), ValidationError> {
        image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ValidationError::InvalidImage(e.to_string()))?
            .decode()
            .map_err(|e| ValidationError::InvalidImage(e.to_string()))?;
        Ok(())
    }

    /// Run every check and collect the failures.
    pub fn validate(&self, filename: &str, data: &[u8]) -> ValidationReport {
        let errors = [
            self.validate_extension(filename),
            self.validate_file_size(data.len()),
            self.validate_content(data),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        ValidationReport { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn validator() -> ImageValidator {
        ImageValidator::from_config(&Config::default())
    }

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(16, 16, Rgb([200, 40, 10]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
        buffer
    }

    #[test]
    fn test_accepts_every_supported_extension() {
        let validator = validator();
        for ext in ["png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp"] {
            let format = ImageFormat::from_extension(ext).unwrap();
            let data = encoded(format);
            let report = validator.validate(&format!("photo.{}", ext), &data);
            assert!(report.is_ok(), "{}: {:?}", ext, report.messages());
        }
    }

    #[test]
    fn test_rejects_truncated_stream_with_valid_extension() {
        let validator = validator();
        for ext in ["png", "jpg", "gif", "bmp", "tiff", "webp"] {
            let format = ImageFormat::from_extension(ext).unwrap();
            let data = encoded(format);
            let truncated = &data[..data.len() / 3];
            let report = validator.validate(&format!("photo.{}", ext), truncated);
            assert!(!report.is_ok(), "{} should be rejected", ext);
            assert!(report
                .errors
                .iter()
                .all(|e| matches!(e, ValidationError::InvalidImage(_))));
        }
    }

    #[test]
    fn test_rejects_non_image_bytes() {
        let report = validator().validate("notes.png", b"definitely not an image");
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(report.errors[0], ValidationError::InvalidImage(_)));
    }

    #[test]
    fn test_collects_independent_failures() {
        let validator = ImageValidator::new(4, vec!["png".to_string()]);
        let report = validator.validate("script.exe", b"MZ not an image");

        assert_eq!(report.errors.len(), 3);
        assert!(matches!(
            report.errors[0],
            ValidationError::InvalidExtension { .. }
        ));
        assert!(matches!(
            report.errors[1],
            ValidationError::FileTooLarge { size: 15, max: 4 }
        ));
        assert_eq!(report.messages().len(), 3);
    }

    #[test]
    fn test_validate_file_size() {
        let validator = ImageValidator::new(16 * 1024 * 1024, vec![]);
        assert_eq!(
            validator.validate_file_size(0),
            Err(ValidationError::EmptyFile)
        );
        assert!(validator.validate_file_size(16 * 1024 * 1024).is_ok());
        assert!(validator.validate_file_size(16 * 1024 * 1024 + 1).is_err());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let validator = validator();
        assert!(validator.validate_extension("HOLIDAY.JPG").is_ok());
        assert_eq!(
            validator.validate_extension("README"),
            Err(ValidationError::MissingExtension("README".to_string()))
        );
    }
}
