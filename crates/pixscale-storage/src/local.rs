use crate::keys::validate_object_name;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Local filesystem storage implementation
///
/// The bucket is a directory under `base_path`; objects are files inside it.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    bucket: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding bucket directories (e.g., "/var/lib/pixscale")
    /// * `bucket` - Bucket name, used as the directory name under `base_path`
    ///
    /// The base directory is created here; the bucket directory is not (see
    /// [`crate::ensure_bucket`]).
    pub async fn new(
        base_path: impl Into<PathBuf>,
        bucket: impl Into<String>,
    ) -> StorageResult<Self> {
        let base_path = base_path.into();
        let bucket = bucket.into();

        if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
            return Err(StorageError::ConfigError(format!(
                "Invalid bucket name for local storage: {:?}",
                bucket
            )));
        }

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path, bucket })
    }

    fn bucket_path(&self) -> PathBuf {
        self.base_path.join(&self.bucket)
    }

    /// Convert an object name to a filesystem path inside the bucket directory
    fn key_to_path(&self, object_name: &str) -> StorageResult<PathBuf> {
        validate_object_name(object_name)?;
        Ok(self.bucket_path().join(object_name))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write_atomically(&self, path: &Path, data: &[u8]) -> std::io::Result<()> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        let result = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(data).await?;
            file.sync_all().await?;
            fs::rename(&temp_path, path).await
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    }
}

#[async_trait]
impl Storage for LocalStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn bucket_exists(&self) -> StorageResult<bool> {
        let path = self.bucket_path();
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_dir() => Ok(true),
            Ok(_) => Err(StorageError::BucketError(format!(
                "{} exists but is not a directory",
                path.display()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn make_bucket(&self) -> StorageResult<()> {
        let path = self.bucket_path();
        fs::create_dir_all(&path).await.map_err(|e| {
            StorageError::BucketError(format!(
                "Failed to create bucket directory {}: {}",
                path.display(),
                e
            ))
        })
    }

    async fn put_object(
        &self,
        object_name: &str,
        data: Bytes,
        _content_type: &str,
    ) -> StorageResult<String> {
        let path = self.key_to_path(object_name)?;
        let size = data.len();

        match self.bucket_exists().await {
            Ok(true) => {}
            Ok(false) => {
                return Err(StorageError::UploadFailed(format!(
                    "bucket {} does not exist",
                    self.bucket
                )))
            }
            Err(e) => return Err(StorageError::UploadFailed(e.to_string())),
        }

        self.ensure_parent_dir(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to prepare {}: {}", path.display(), e))
        })?;

        let start = std::time::Instant::now();

        self.write_atomically(&path, &data).await.map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path.display(),
                key = %object_name,
                size_bytes = size,
                "Local storage upload failed"
            );
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %object_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(path.display().to_string())
    }

    async fn get_object(&self, object_name: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(object_name)?;

        fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(object_name.to_string()),
            _ => StorageError::DownloadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            )),
        })
    }

    async fn exists(&self, object_name: &str) -> StorageResult<bool> {
        let path = self.key_to_path(object_name)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
