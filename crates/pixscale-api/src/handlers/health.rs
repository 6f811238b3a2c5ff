use axum::{http::StatusCode, response::IntoResponse, Json};

/// Liveness probe - process is running and serving requests.
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
