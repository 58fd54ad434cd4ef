//! Application state

use pdfsmith_auth::TokenService;
use pdfsmith_storage::DocumentStore;
use pdfsmith_users::UserStore;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        documents: Arc<dyn DocumentStore>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            documents,
            tokens,
        }
    }
}
