//! `POST /process-image`

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::Json;
use pixscale_core::AppError;
use std::sync::Arc;

use crate::constants::SUCCESS_MESSAGE;
use crate::error::{HttpAppError, MessageResponse};
use crate::services::process_upload;
use crate::state::AppState;
use crate::validation::{validate_upload, ScaleQuery};

/// Rescale the uploaded image and store it as JPEG.
///
/// Query: `scale` (default 0.25). Body: multipart form with a `file` part.
#[tracing::instrument(skip_all)]
pub async fn process_image(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ScaleQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>, HttpAppError> {
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    if let Err(rejection) = &multipart {
        tracing::debug!(error = %rejection, "Request body is not multipart");
    }

    let request = validate_upload(&query, multipart.ok()).await?;
    tracing::debug!(
        filename = %request.filename,
        scale = %request.scale,
        input_bytes = request.data.len(),
        "Upload accepted"
    );

    process_upload(&state, request).await?;

    Ok(Json(MessageResponse {
        message: SUCCESS_MESSAGE.to_string(),
    }))
}
