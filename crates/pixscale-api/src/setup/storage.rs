//! Storage setup and initialization

use anyhow::{Context, Result};
use pixscale_core::Config;
use pixscale_storage::{create_storage, ensure_bucket, Storage};
use std::sync::Arc;

/// Build the configured backend and make sure its bucket exists.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(
        backend = %config.storage_backend(),
        bucket = %config.bucket(),
        endpoint = %config.storage_endpoint_url(),
        "Initializing storage..."
    );

    let storage = create_storage(config)
        .await
        .context("Failed to create storage backend")?;

    ensure_bucket(storage.as_ref())
        .await
        .with_context(|| format!("Failed to prepare bucket {}", config.bucket()))?;

    tracing::info!(
        backend = ?storage.backend_type(),
        bucket = %storage.bucket(),
        "Storage initialized successfully"
    );

    Ok(storage)
}
