//! Document store trait

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;

/// Document store abstraction.
///
/// Implementations provide durable storage of uploaded documents
/// keyed by randomly generated ids.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a document and return its freshly generated id
    async fn put(&self, data: Bytes) -> Result<String, StorageError>;

    /// Read a document fully into memory
    async fn get(&self, document_id: &str) -> Result<Bytes, StorageError>;

    /// Check whether a document exists
    async fn exists(&self, document_id: &str) -> Result<bool, StorageError>;

    /// Probe that the backing storage is writable
    async fn probe_writable(&self) -> Result<(), StorageError>;
}
