//! Local disk document store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::DocumentStore;
use crate::error::StorageError;

/// Local disk document store.
///
/// Stores each document as `<base_path>/<id>.pdf`. Ids must parse as
/// UUIDs before any path is built, so a client-supplied id can never
/// name a path outside the base directory.
pub struct LocalDocumentStore {
    base_path: PathBuf,
}

impl LocalDocumentStore {
    /// Create a new local document store
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();

        fs::create_dir_all(&base_path).await?;

        info!("Initialized document store at {:?}", base_path);

        Ok(Self { base_path })
    }

    /// Get the file path for a document id.
    ///
    /// Ids that are not UUIDs cannot name a stored document, so they
    /// behave as not-found.
    fn document_path(&self, document_id: &str) -> Result<PathBuf, StorageError> {
        let id = Uuid::parse_str(document_id)
            .map_err(|_| StorageError::NotFound(document_id.to_string()))?;

        Ok(self.base_path.join(format!("{}.pdf", id)))
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn put(&self, data: Bytes) -> Result<String, StorageError> {
        let document_id = Uuid::new_v4().to_string();
        let path = self.base_path.join(format!("{}.pdf", document_id));

        debug!("Writing document to {:?}", path);

        // Write via a temp file so a failed upload never leaves a
        // partial document under a valid id
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &path).await?;

        Ok(document_id)
    }

    async fn get(&self, document_id: &str) -> Result<Bytes, StorageError> {
        let path = self.document_path(document_id)?;

        debug!("Reading document from {:?}", path);

        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(document_id.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;

        Ok(Bytes::from(data))
    }

    async fn exists(&self, document_id: &str) -> Result<bool, StorageError> {
        let path = match self.document_path(document_id) {
            Ok(path) => path,
            Err(StorageError::NotFound(_)) => return Ok(false),
            Err(e) => return Err(e),
        };

        Ok(path.exists())
    }

    async fn probe_writable(&self) -> Result<(), StorageError> {
        let probe = self.base_path.join(".ready_probe");

        fs::write(&probe, b"ok").await?;
        fs::remove_file(&probe).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path()).await.unwrap();

        let data = Bytes::from_static(b"%PDF-1.4\nhello\n%%EOF");
        let id = store.put(data.clone()).await.unwrap();

        assert!(store.exists(&id).await.unwrap());
        assert_eq!(store.get(&id).await.unwrap(), data);
    }

    #[tokio::test]
    async fn test_fresh_ids_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path()).await.unwrap();

        let first = store.put(Bytes::from_static(b"a")).await.unwrap();
        let second = store.put(Bytes::from_static(b"a")).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path()).await.unwrap();

        let id = Uuid::new_v4().to_string();
        assert!(!store.exists(&id).await.unwrap());
        assert!(matches!(
            store.get(&id).await.unwrap_err(),
            StorageError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_traversal_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path()).await.unwrap();

        assert!(!store.exists("../../etc/passwd").await.unwrap());
        assert!(matches!(
            store.get("../../etc/passwd").await.unwrap_err(),
            StorageError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_probe_writable() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path()).await.unwrap();

        store.probe_writable().await.unwrap();
    }
}
