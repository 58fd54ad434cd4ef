//! Signed bearer token management

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// Default token lifetime in minutes
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Issues and verifies signed bearer tokens.
///
/// Tokens are stateless: validity is established by checking the
/// signature and expiry, never by a server-side lookup.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_minutes: i64,
}

impl TokenService {
    /// Create a new token service signing with the given secret
    pub fn new(secret: &str, token_ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl_minutes,
        }
    }

    /// Issue a token for a subject
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.token_ttl_minutes);

        let claims = Claims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        debug!("Issuing token for subject: {}", subject);

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AuthError::Jwt)
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        // Check expiration
        let now = Utc::now().timestamp();
        if token_data.claims.exp < now {
            return Err(AuthError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}
