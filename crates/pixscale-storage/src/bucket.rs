//! Startup bucket provisioning

use crate::traits::{Storage, StorageResult};

/// Make sure the backend's bucket exists, creating it when missing.
///
/// Runs once while the process starts; requests never re-check the bucket.
pub async fn ensure_bucket(storage: &dyn Storage) -> StorageResult<()> {
    let bucket = storage.bucket();

    if storage.bucket_exists().await? {
        tracing::info!(bucket = %bucket, backend = %storage.backend_type(), "Bucket exists");
        return Ok(());
    }

    tracing::info!(bucket = %bucket, "Bucket not found, creating it");
    storage.make_bucket().await?;
    tracing::info!(bucket = %bucket, backend = %storage.backend_type(), "Bucket created");

    Ok(())
}
