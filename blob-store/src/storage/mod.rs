//! Storage module
//!
//! Provides best-effort blob storage for large book text fields.

pub mod blob_store;
pub mod document_store;

pub use blob_store::BlobStore;
pub use document_store::DocumentStore;
