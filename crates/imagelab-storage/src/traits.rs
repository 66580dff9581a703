//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A listed entry of a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
}

/// Storage abstraction trait
///
/// The gallery keeps uploads in one store and processed outputs in another; both go
/// through this trait so neither needs to know where bytes actually live.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `key`, replacing any existing object.
    async fn put(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read an object by key.
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Remove an object. Returns whether something was deleted.
    async fn delete(&self, key: &str) -> StorageResult<bool>;

    /// Size and modification time of one object.
    async fn stat(&self, key: &str) -> StorageResult<StoredObject>;

    /// List every object in the store, in no particular order.
    async fn list(&self) -> StorageResult<Vec<StoredObject>>;
}
