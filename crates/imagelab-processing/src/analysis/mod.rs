//! Read-only analyzers that summarize an image instead of producing one.

pub mod histogram;
pub mod regions;

pub use histogram::{HistogramChannel, HistogramReport};
pub use regions::{FaceDetector, Region};

#[cfg(feature = "face-detection")]
pub use regions::CascadeFaceDetector;
