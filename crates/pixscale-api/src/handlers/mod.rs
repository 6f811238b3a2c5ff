//! HTTP request handlers

pub mod health;
pub mod process_image;

use crate::error::HttpAppError;
use pixscale_core::AppError;

/// Fallback for unknown routes
pub async fn not_found() -> HttpAppError {
    HttpAppError(AppError::NotFound("Not found".to_string()))
}
