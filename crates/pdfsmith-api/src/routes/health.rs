//! Health and readiness endpoints

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Health status response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Health check handler
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness handler, probing that document storage is writable
async fn ready(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    state
        .documents
        .probe_writable()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
    }))
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}
