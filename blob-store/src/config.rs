//! Blob store configuration
//!
//! Central location for connection constants and the [`BlobStoreConfig`]
//! resolved from the environment at startup.

use std::time::Duration;

// ===== Connection =====

/// Environment variable overriding the connection target
pub const BLOB_STORE_URL_ENV: &str = "BLOB_STORE_URL";

/// Logical database holding the blob collection.
/// The default connection target is the database file of the same name.
pub const DATABASE_NAME: &str = "bookstore_blob";

/// Local connection target used when the environment does not provide one
pub const DEFAULT_BLOB_STORE_URL: &str = "sqlite://bookstore_blob.db?mode=rwc";

/// Collection (table) holding one record per book
pub const COLLECTION_NAME: &str = "book_content";

/// Upper bound on establishing the connection.
/// Construction must never hang on an unreachable store.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// How long a statement waits on a locked database before failing
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool size for file-backed stores
pub const MAX_CONNECTIONS: u32 = 5;

/// Connection settings for a [`crate::storage::BlobStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobStoreConfig {
    pub url: String,
    pub collection: String,
    pub connect_timeout: Duration,
    pub max_connections: u32,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BLOB_STORE_URL.to_string(),
            collection: COLLECTION_NAME.to_string(),
            connect_timeout: CONNECT_TIMEOUT,
            max_connections: MAX_CONNECTIONS,
        }
    }
}

impl BlobStoreConfig {
    /// Resolve the connection target from `BLOB_STORE_URL`, falling back to
    /// the local default when it is unset or blank.
    pub fn from_env() -> Self {
        let url = std::env::var(BLOB_STORE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());

        match url {
            Some(url) => Self::default().with_url(url),
            None => Self::default(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Whether the target is a private in-memory database.
    /// Each in-memory connection is its own database, so the pool must
    /// keep exactly one.
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}
