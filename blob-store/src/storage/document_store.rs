//! Document store capability
//!
//! The operations [`super::BlobStore`] needs from its backing store. Every
//! method reports failure through [`Result`]; turning failures into degraded
//! results is the caller's job.

use crate::database::{BlobRecord, BookBlob};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert the blob, or replace all text fields of the existing record
    /// with the same book id.
    async fn upsert(&self, blob: &BookBlob) -> Result<()>;

    /// Fetch the text fields stored for a book id
    async fn find_one(&self, book_id: &str) -> Result<Option<BlobRecord>>;

    /// Make sure the combined text index exists. Must be idempotent.
    async fn ensure_text_index(&self) -> Result<()>;

    /// Book ids whose text matches the keyword, most relevant first.
    /// Requires the text index.
    async fn text_search(&self, keyword: &str) -> Result<Vec<String>>;
}
