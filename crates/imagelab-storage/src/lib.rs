//! Imagelab Storage Library
//!
//! This crate provides the storage abstraction used for uploads and processed outputs,
//! and a local filesystem implementation.
//!
//! # Storage key format
//!
//! Each store is a single flat directory, so keys are plain file names. Keys must not
//! contain path separators, `..` or a leading `/`; callers holding untrusted names should
//! reduce them with [`keys::sanitize_filename`] first.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::sanitize_filename;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
