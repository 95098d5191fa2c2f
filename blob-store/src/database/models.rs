//! Database models
//!
//! Rust structs representing stored blob documents.
//! Models use serde so the calling application can hand them straight to
//! its API layer.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The text fields stored for a book.
///
/// The default value (all fields empty) is what callers receive whenever a
/// record is missing or the store is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BlobRecord {
    pub content: String,
    pub book_intro: String,
    pub author_intro: String,
}

/// A full blob document keyed by book id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookBlob {
    pub book_id: String,
    pub content: String,
    pub book_intro: String,
    pub author_intro: String,
}

impl BookBlob {
    pub fn new(
        book_id: impl Into<String>,
        content: impl Into<String>,
        book_intro: impl Into<String>,
        author_intro: impl Into<String>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            content: content.into(),
            book_intro: book_intro.into(),
            author_intro: author_intro.into(),
        }
    }

    /// Drop the key, keeping the caller-visible fields
    pub fn into_record(self) -> BlobRecord {
        BlobRecord {
            content: self.content,
            book_intro: self.book_intro,
            author_intro: self.author_intro,
        }
    }
}
