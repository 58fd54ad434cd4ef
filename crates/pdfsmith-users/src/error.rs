//! Credential store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate user: {0}")]
    Duplicate(String),

    #[error("Corrupt user record: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error(transparent)]
    Hash(#[from] pdfsmith_auth::AuthError),
}
