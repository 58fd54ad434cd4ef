//! pdfsmith document storage
//!
//! This crate provides storage for uploaded documents, keyed by
//! randomly generated ids, with a local-disk implementation.

pub mod backend;
pub mod error;
pub mod local;

pub use backend::DocumentStore;
pub use error::StorageError;
pub use local::LocalDocumentStore;
