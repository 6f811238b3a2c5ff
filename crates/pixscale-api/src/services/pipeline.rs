//! Upload pipeline: rescale on a blocking thread, then publish.

use pixscale_processing::ImageTransformer;
use std::time::Instant;

use crate::error::HttpAppError;
use crate::services::publisher::{ImagePublisher, PublishedImage};
use crate::state::AppState;
use crate::validation::UploadRequest;

/// Run a validated upload through the transformer and into storage.
///
/// Nothing is written when decoding or encoding fails.
pub async fn process_upload(
    state: &AppState,
    request: UploadRequest,
) -> Result<PublishedImage, HttpAppError> {
    let started = Instant::now();
    let UploadRequest {
        scale,
        filename,
        data,
    } = request;

    let input_bytes = data.len();
    let transformed = tokio::task::spawn_blocking(move || ImageTransformer::rescale(&data, scale))
        .await
        .map_err(|e| anyhow::Error::new(e).context("Image task failed"))??;

    let publisher = ImagePublisher::new(state.storage.clone());
    let published = publisher.publish(&filename, scale, &transformed).await?;

    tracing::info!(
        filename = %filename,
        scale = %scale,
        bucket = %published.bucket,
        key = %published.object_name,
        url = %published.url,
        input_bytes,
        size_bytes = published.size_bytes,
        width = transformed.width,
        height = transformed.height,
        duration_ms = started.elapsed().as_millis() as u64,
        "Image processed and uploaded"
    );

    Ok(published)
}
