//! Credential store trait

use async_trait::async_trait;

use crate::error::UserStoreError;
use crate::models::UserRecord;

/// Credential store abstraction.
///
/// Implementations own the mapping from username to user record. The
/// trait is object-safe so a different backend can replace the file
/// store without touching the API layer.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Register a new user.
    ///
    /// The username is normalized to lowercase. Fails with
    /// [`UserStoreError::Duplicate`] if it is already taken.
    async fn register(&self, username: &str, password: &str) -> Result<UserRecord, UserStoreError>;

    /// Verify credentials, returning the record when they match.
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, UserStoreError>;

    /// Look up a user by name.
    async fn lookup(&self, username: &str) -> Result<Option<UserRecord>, UserStoreError>;
}
