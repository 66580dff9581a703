//! Imagelab Processing Library
//!
//! Everything that touches pixels lives here:
//! - upload validation and metadata extraction (`validator`, `metadata`, `codec`)
//! - the operation registry, catalog, dispatcher and transform library (`image`)
//! - read-only analyzers for histograms and regions (`analysis`)
//! - the gallery and processing services that tie those to storage (`gallery`, `service`)
//! - ZIP packaging for batch downloads (`archive`)

pub mod analysis;
pub mod archive;
pub mod codec;
pub mod error;
pub mod gallery;
pub mod image;
pub mod metadata;
pub mod service;
pub mod validator;

pub use crate::image::catalog::{list_operations, OperationInfo};
pub use crate::image::params::OperationParams;
pub use crate::image::presets::{list_presets, PresetInfo};
pub use analysis::{FaceDetector, HistogramReport, Region};
pub use error::{ProcessingError, ProcessingResult};
pub use gallery::{Gallery, UploadFailure, UploadOutcome};
pub use service::{BatchArchive, ProcessingService, RoiKind};
pub use validator::{ImageValidator, ValidationError, ValidationReport};

#[cfg(feature = "face-detection")]
pub use analysis::CascadeFaceDetector;
