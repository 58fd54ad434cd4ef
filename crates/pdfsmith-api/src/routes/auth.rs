//! Authentication extractors and routes

use axum::{
    Form, Json, Router,
    extract::{FromRef, FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts},
    routing::post,
};
use pdfsmith_auth::AuthError;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::types::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};

// ==================== Auth Extractor ====================

/// Authenticated user bound to the request, for attribution
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

/// Extractor for authenticated requests.
///
/// Extracts the bearer token, verifies signature and expiry, and
/// re-checks that the subject still names a known user. Rejection
/// happens before any document operation runs.
pub struct RequireAuth(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::MissingAuthHeader)?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AuthError::InvalidAuthHeader.into());
        }

        let token = &auth_header[7..];
        let claims = app_state.tokens.verify(token)?;

        // Tokens prove identity only; the subject must still resolve
        // to a registered user
        let user = app_state
            .users
            .lookup(&claims.sub)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        debug!("Authenticated user: {}", user.username);

        Ok(RequireAuth(AuthUser {
            username: user.username,
        }))
    }
}

// ==================== Input Validation ====================

/// Maximum allowed username length
const MAX_USERNAME_LENGTH: usize = 64;
/// Maximum allowed password length (prevent DoS with very large passwords)
const MAX_PASSWORD_LENGTH: usize = 256;

/// Validate username format and length
fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.is_empty() {
        return Err(ApiError::BadRequest("Username cannot be empty".to_string()));
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Username exceeds maximum length of {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    // Only allow alphanumeric characters, underscores, and hyphens
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::BadRequest(
            "Username can only contain alphanumeric characters, underscores, and hyphens"
                .to_string(),
        ));
    }
    Ok(())
}

// ==================== Auth Routes ====================

/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    Form(request): Form<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_username(&request.username)?;
    if request.password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }

    let record = state
        .users
        .register(&request.username, &request.password)
        .await?;

    info!("Registered user: {}", record.username);

    Ok(Json(MessageResponse {
        msg: format!("User '{}' registered", record.username),
    }))
}

/// POST /auth/token
async fn token(
    State(state): State<AppState>,
    Form(request): Form<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    debug!("Login attempt for user: {}", request.username);

    let user = state
        .users
        .verify(&request.username, &request.password)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let access_token = state.tokens.issue(&user.username)?;

    info!("User {} logged in successfully", user.username);

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/token", post(token))
}
