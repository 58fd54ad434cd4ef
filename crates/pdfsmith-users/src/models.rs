//! Credential store models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// The username is stored lowercased; the password hash is a PHC
/// string with the salt embedded. Records are created on registration
/// and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
