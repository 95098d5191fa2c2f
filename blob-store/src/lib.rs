//! Book blob store
//!
//! Best-effort storage for the large text fields of a book (content, book
//! introduction, author introduction) with keyword search over them.
//! Failures never reach the caller: operations degrade to empty results.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod storage;

pub use app::{blob_store, AppState};
pub use config::BlobStoreConfig;
pub use database::BlobRecord;
pub use storage::BlobStore;
