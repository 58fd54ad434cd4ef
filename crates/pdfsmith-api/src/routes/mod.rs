//! API routes

mod auth;
mod documents;
mod health;
pub mod types;

use axum::{Router, extract::DefaultBodyLimit};

use crate::state::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and readiness probes
        .merge(health::routes())
        // Registration and token issuance
        .merge(auth::routes())
        // Authenticated document operations
        .merge(documents::routes())
        .with_state(state)
        // Allow large PDF uploads (100MB max)
        .layer(DefaultBodyLimit::max(100 * 1024 * 1024))
}
