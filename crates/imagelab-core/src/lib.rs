//! Imagelab Core Library
//!
//! This crate provides the domain models, error types, configuration and constants
//! shared by the storage, processing and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ImageInfo, ImageMetadata, StoredImage};
