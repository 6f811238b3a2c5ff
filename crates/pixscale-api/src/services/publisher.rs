//! Storage publisher: names the rescaled image and writes it to the bucket.

use pixscale_processing::{ScaleFactor, TransformedImage};
use pixscale_storage::{derive_object_name, Storage, StorageResult};
use std::sync::Arc;

/// Where a published image ended up
#[derive(Debug, Clone)]
pub struct PublishedImage {
    pub bucket: String,
    pub object_name: String,
    pub url: String,
    pub size_bytes: usize,
}

/// Writes transformed images under `{stem}_{scale}{extension}`.
///
/// The write is the only mutating step of a request and happens once; there
/// is no retry.
pub struct ImagePublisher {
    storage: Arc<dyn Storage>,
}

impl ImagePublisher {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn publish(
        &self,
        original_filename: &str,
        scale: ScaleFactor,
        image: &TransformedImage,
    ) -> StorageResult<PublishedImage> {
        let object_name = derive_object_name(original_filename, scale);

        let url = self
            .storage
            .put_object(&object_name, image.data.clone(), image.content_type)
            .await?;

        Ok(PublishedImage {
            bucket: self.storage.bucket().to_string(),
            object_name,
            url,
            size_bytes: image.len(),
        })
    }
}
