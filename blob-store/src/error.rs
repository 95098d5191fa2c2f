//! Error types for the blob store
//!
//! Errors are structured with thiserror and flow through the backing-store
//! layer with `?`. They never leave [`crate::storage::BlobStore`]: the public
//! blob operations log them and degrade instead.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),

    #[error("Timed out connecting to blob store after {0:?}")]
    ConnectTimeout(Duration),
}

pub type Result<T> = std::result::Result<T, StoreError>;
