//! Pixscale Storage Library
//!
//! This crate provides the storage abstraction processed images are published
//! through, with an S3-compatible backend (MinIO, AWS) and a local filesystem
//! backend.
//!
//! # Object names
//!
//! Every backend is bound to a single bucket. Objects are addressed by name
//! inside that bucket; names derived from an upload are built by
//! [`derive_object_name`] as `{stem}_{scale}{extension}`. Names must not be
//! empty, contain `..` or start with `/`.

pub mod bucket;
pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use bucket::ensure_bucket;
pub use factory::create_storage;
pub use keys::{derive_object_name, split_extension};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use pixscale_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
