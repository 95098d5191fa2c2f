//! Best-effort book blob storage
//!
//! Persists the large text fields of a book (content, book introduction,
//! author introduction) keyed by book id, and searches them by keyword.
//!
//! Blob text is supplementary data. Every failure, including a store that
//! never connected, is logged and turned into a neutral result:
//! - `put_book_blob` does nothing
//! - `get_book_blob` returns an all-empty [`BlobRecord`]
//! - `search_in_blob` returns no ids
//!
//! A store that failed to connect stays disconnected for its lifetime.

use super::document_store::DocumentStore;
use crate::config::BlobStoreConfig;
use crate::database::{BlobRecord, BookBlob, SqliteDocumentStore};
use std::sync::Arc;

/// Book blob store. Clones share the same connection.
#[derive(Clone, Default)]
pub struct BlobStore {
    handle: Option<Arc<dyn DocumentStore>>,
}

impl BlobStore {
    /// Connect to the configured store.
    ///
    /// Never fails: on any connection error the store is returned in the
    /// not-ready state.
    pub async fn connect(config: &BlobStoreConfig) -> Self {
        tracing::info!(
            "Connecting to blob store {} (collection: {})",
            config.url,
            config.collection
        );

        match SqliteDocumentStore::connect(config).await {
            Ok(store) => {
                tracing::info!("Blob store ready");
                Self::with_store(Arc::new(store))
            }
            Err(e) => {
                tracing::error!("Failed to connect to blob store: {}", e);
                Self::disconnected()
            }
        }
    }

    /// Use an already connected document store
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            handle: Some(store),
        }
    }

    /// A store with no connection; every operation is a no-op
    pub fn disconnected() -> Self {
        Self { handle: None }
    }

    pub fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    /// Save the text fields of a book, replacing any previous values
    pub async fn put_book_blob(
        &self,
        book_id: &str,
        content: &str,
        book_intro: &str,
        author_intro: &str,
    ) {
        let Some(store) = &self.handle else {
            return;
        };

        let blob = BookBlob::new(book_id, content, book_intro, author_intro);

        if let Err(e) = store.upsert(&blob).await {
            tracing::error!("Blob store put error for book {}: {}", book_id, e);
        }
    }

    /// Fetch the text fields of a book, or empty fields if unavailable
    pub async fn get_book_blob(&self, book_id: &str) -> BlobRecord {
        let Some(store) = &self.handle else {
            return BlobRecord::default();
        };

        match store.find_one(book_id).await {
            Ok(Some(record)) => record,
            Ok(None) => BlobRecord::default(),
            Err(e) => {
                tracing::error!("Blob store get error for book {}: {}", book_id, e);
                BlobRecord::default()
            }
        }
    }

    /// Book ids whose text matches `keyword`, most relevant first.
    ///
    /// The text index is ensured on every call; only the first call on a
    /// fresh collection pays for building it.
    pub async fn search_in_blob(&self, keyword: &str) -> Vec<String> {
        let Some(store) = &self.handle else {
            return Vec::new();
        };

        if let Err(e) = store.ensure_text_index().await {
            tracing::error!("Blob store text index error: {}", e);
            return Vec::new();
        }

        match store.text_search(keyword).await {
            Ok(book_ids) => book_ids,
            Err(e) => {
                tracing::error!("Blob store search error for {:?}: {}", keyword, e);
                Vec::new()
            }
        }
    }
}
