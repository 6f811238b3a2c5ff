use async_trait::async_trait;
use bytes::Bytes;
use pixscale_storage::{Storage, StorageBackend, StorageError, StorageResult};

/// Backend whose writes always fail, as with an unreachable object store
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    fn bucket(&self) -> &str {
        super::TEST_BUCKET
    }

    async fn bucket_exists(&self) -> StorageResult<bool> {
        Ok(true)
    }

    async fn make_bucket(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn put_object(
        &self,
        _object_name: &str,
        _data: Bytes,
        _content_type: &str,
    ) -> StorageResult<String> {
        Err(StorageError::UploadFailed("connection refused".to_string()))
    }

    async fn get_object(&self, object_name: &str) -> StorageResult<Vec<u8>> {
        Err(StorageError::NotFound(object_name.to_string()))
    }

    async fn exists(&self, _object_name: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
