//! File-backed credential store

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use pdfsmith_auth::{hash_password, verify_password};

use crate::error::UserStoreError;
use crate::models::UserRecord;
use crate::store::UserStore;

/// A well-formed argon2 hash that matches no password. Verified in
/// place of a real hash when the user is unknown, so login latency
/// does not reveal whether an account exists.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$cGxhY2Vob2xkZXJzYWx0dmFsdWU$MDEyMzQ1Njc4OWFiY2RlZg";

/// Credential store persisting one JSON record per line.
///
/// Every registration rewrites the whole file; the load-mutate-save
/// sequence is serialized by a process-wide lock so racing
/// registrations cannot lose updates.
pub struct FileUserStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileUserStore {
    /// Create a store backed by the given record file
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, UserStoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        info!("Initialized user store at {:?}", path);

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Load the full username -> record mapping
    async fn load(&self) -> Result<BTreeMap<String, UserRecord>, UserStoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(UserStoreError::Io(e)),
        };

        let mut users = BTreeMap::new();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let record: UserRecord = serde_json::from_str(line)?;
            users.insert(record.username.clone(), record);
        }

        Ok(users)
    }

    /// Persist the full mapping, replacing the record file atomically
    async fn save(&self, users: &BTreeMap<String, UserRecord>) -> Result<(), UserStoreError> {
        let mut content = String::new();
        for record in users.values() {
            content.push_str(&serde_json::to_string(record)?);
            content.push('\n');
        }

        // Write to a temp file in the same directory, then rename over
        // the target so a crash mid-write leaves the old file intact
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn register(&self, username: &str, password: &str) -> Result<UserRecord, UserStoreError> {
        let username = username.to_lowercase();

        let _guard = self.write_lock.lock().await;

        let mut users = self.load().await?;
        if users.contains_key(&username) {
            return Err(UserStoreError::Duplicate(username));
        }

        let record = UserRecord {
            username: username.clone(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };

        users.insert(username.clone(), record.clone());
        self.save(&users).await?;

        info!("Registered user: {}", username);
        Ok(record)
    }

    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let record = self.lookup(username).await?;

        // Always perform a verification so the timing is the same for
        // unknown users and wrong passwords
        let hash_to_verify = match &record {
            Some(r) => r.password_hash.clone(),
            None => DUMMY_HASH.to_string(),
        };

        let password_valid = verify_password(password, &hash_to_verify)?;

        debug!("Verified credentials for {}: {}", username, password_valid);

        Ok(match (record, password_valid) {
            (Some(r), true) => Some(r),
            _ => None,
        })
    }

    async fn lookup(&self, username: &str) -> Result<Option<UserRecord>, UserStoreError> {
        let users = self.load().await?;
        Ok(users.get(&username.to_lowercase()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_in(dir: &tempfile::TempDir) -> FileUserStore {
        FileUserStore::new(dir.path().join("users.jsonl"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_and_verify() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        let record = store.register("alice", "pw1").await.unwrap();
        assert_eq!(record.username, "alice");

        assert!(store.verify("alice", "pw1").await.unwrap().is_some());
        assert!(store.verify("alice", "wrong").await.unwrap().is_none());
        assert!(store.verify("nobody", "pw1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        store.register("alice", "pw1").await.unwrap();
        let err = store.register("alice", "pw2").await.unwrap_err();
        assert!(matches!(err, UserStoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_username_case_normalization() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        store.register("Alice", "pw1").await.unwrap();

        assert!(store.lookup("ALICE").await.unwrap().is_some());
        assert!(store.verify("aLiCe", "pw1").await.unwrap().is_some());
        assert!(matches!(
            store.register("alice", "pw2").await.unwrap_err(),
            UserStoreError::Duplicate(_)
        ));
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.jsonl");

        let store = FileUserStore::new(&path).await.unwrap();
        store.register("alice", "pw1").await.unwrap();
        store.register("bob", "pw2").await.unwrap();
        drop(store);

        let reopened = FileUserStore::new(&path).await.unwrap();
        assert!(reopened.lookup("alice").await.unwrap().is_some());
        assert!(reopened.verify("bob", "pw2").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        assert!(store.lookup("alice").await.unwrap().is_none());
        assert!(store.verify("alice", "pw1").await.unwrap().is_none());
    }
}
