//! Database module
//!
//! This module provides the SQLite realization of the document store:
//! - Connection pool bootstrap with a bounded connect time
//! - Collection and full-text index schema
//! - Record models
//! - Keyword translation into FTS5 match expressions
//! - The [`SqliteDocumentStore`] implementing [`crate::storage::DocumentStore`]

pub mod models;
pub mod repository;
pub mod schema;
pub mod text_query;

pub use models::*;
pub use repository::SqliteDocumentStore;
pub use schema::{ensure_text_index, initialize_collection};
pub use text_query::TextQuery;

use crate::config::{BlobStoreConfig, BUSY_TIMEOUT};
use crate::error::{Result, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Build connection options for a `sqlite:` connection target.
fn connect_options(config: &BlobStoreConfig) -> Result<SqliteConnectOptions> {
    if !config.url.starts_with("sqlite:") {
        return Err(StoreError::Config(format!(
            "unsupported connection target: {}",
            config.url
        )));
    }

    let opts = SqliteConnectOptions::from_str(&config.url)?.busy_timeout(BUSY_TIMEOUT);

    if config.is_in_memory() {
        Ok(opts)
    } else {
        Ok(opts.journal_mode(SqliteJournalMode::Wal))
    }
}

/// Create a connection pool for the configured store.
///
/// The pool opens one connection eagerly, so an unreachable target fails
/// here. The whole attempt is bounded by `connect_timeout`.
pub async fn create_pool(config: &BlobStoreConfig) -> Result<SqlitePool> {
    tracing::info!("Creating blob store connection pool at: {}", config.url);

    let options = connect_options(config)?;

    let mut pool_options = SqlitePoolOptions::new().acquire_timeout(config.connect_timeout);

    // An in-memory database lives and dies with its single connection
    pool_options = if config.is_in_memory() {
        pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.max_connections)
    };

    let pool = tokio::time::timeout(config.connect_timeout, pool_options.connect_with(options))
        .await
        .map_err(|_| StoreError::ConnectTimeout(config.connect_timeout))??;

    tracing::info!("Blob store pool created successfully");

    Ok(pool)
}
