//! pdfsmith REST API
//!
//! This crate provides the axum-based HTTP API for the pdfsmith
//! document service: registration, token issuance, and authenticated
//! document upload, download, and text replacement.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
