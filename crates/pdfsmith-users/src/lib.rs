//! pdfsmith credential store
//!
//! This crate owns user records for the pdfsmith document service:
//! registration, credential verification, and durable persistence in
//! a single user-record file.

pub mod error;
pub mod file;
pub mod models;
pub mod store;

pub use error::UserStoreError;
pub use file::FileUserStore;
pub use models::UserRecord;
pub use store::UserStore;
