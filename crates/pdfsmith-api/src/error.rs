//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use pdfsmith_storage::StorageError;
use pdfsmith_users::UserStoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Auth error: {0}")]
    Auth(#[from] pdfsmith_auth::AuthError),

    #[error("User store error: {0}")]
    Users(#[from] UserStoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ApiError::Auth(e) => {
                let status = match e {
                    pdfsmith_auth::AuthError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::UNAUTHORIZED,
                };
                (status, e.to_string())
            }
            ApiError::Users(e) => match e {
                UserStoreError::Duplicate(name) => (
                    StatusCode::BAD_REQUEST,
                    format!("Username '{}' is already registered", name),
                ),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
            ApiError::Storage(e) => match e {
                StorageError::NotFound(id) => {
                    (StatusCode::NOT_FOUND, format!("Document not found: {}", id))
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
        };

        let body = axum::Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
