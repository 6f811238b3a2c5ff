//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object name: {0}")]
    InvalidKey(String),

    #[error("Bucket operation failed: {0}")]
    BucketError(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// A backend is bound to one bucket for its whole lifetime. Implementations
/// must be safe to share between concurrent requests.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Name of the bucket this backend writes to
    fn bucket(&self) -> &str;

    /// Check whether the bucket exists
    async fn bucket_exists(&self) -> StorageResult<bool>;

    /// Create the bucket
    async fn make_bucket(&self) -> StorageResult<()>;

    /// Write `data` under `object_name`, replacing any previous object with
    /// that name. Returns the object's URL.
    ///
    /// The write is all-or-nothing: readers see either the previous content
    /// or the full new content.
    async fn put_object(
        &self,
        object_name: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Read an object back
    async fn get_object(&self, object_name: &str) -> StorageResult<Vec<u8>>;

    /// Check if an object exists
    async fn exists(&self, object_name: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
