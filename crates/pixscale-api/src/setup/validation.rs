//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use pixscale_core::{Config, StorageBackend};

/// Validate critical configuration values
///
/// Fails on values the server cannot run with; warns on values that work but
/// are probably a mistake.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.storage_backend() == StorageBackend::S3 {
        let storage = config.storage();
        if storage.access_key == "admin" || storage.secret_key == "admin123" {
            tracing::warn!(
                "Production mode with default MinIO credentials"
            );
        }
        if !storage.secure && !config.storage_endpoint_url().starts_with("https://") {
            tracing::warn!(
                endpoint = %config.storage_endpoint_url(),
                "Production mode with plain HTTP storage endpoint"
            );
        }
    }

    if config.max_upload_size_bytes() > 512 * 1024 * 1024 {
        tracing::warn!(
            max_upload_size_bytes = config.max_upload_size_bytes(),
            "MAX_UPLOAD_SIZE_MB is very high - decoded images may exhaust memory"
        );
    }

    Ok(())
}
