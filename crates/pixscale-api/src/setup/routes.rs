//! Route configuration and setup

use crate::constants::{HEALTH_PATH, PROCESS_IMAGE_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use pixscale_core::Config;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    tracing::debug!(
        max_upload_size_bytes = config.max_upload_size_bytes(),
        "Registering routes"
    );
    create_router(state, config.max_upload_size_bytes())
}

/// Build the router around an existing state.
///
/// Integration tests call this directly with their own storage backend.
pub fn create_router(state: Arc<AppState>, max_upload_size_bytes: usize) -> Router<()> {
    Router::new()
        .route(PROCESS_IMAGE_PATH, post(handlers::process_image::process_image))
        .route(HEALTH_PATH, get(handlers::health::health_check))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(max_upload_size_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
