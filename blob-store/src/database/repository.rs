//! SQLite document store
//!
//! Stores one row per book in the configured collection and searches it
//! through the collection's FTS5 text index.

use super::models::{BlobRecord, BookBlob};
use super::schema::{self, text_index_name, validate_collection_name};
use super::text_query::TextQuery;
use crate::config::BlobStoreConfig;
use crate::error::Result;
use crate::storage::DocumentStore;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Document store backed by a SQLite collection table
#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    collection: String,
    text_index: String,
}

impl SqliteDocumentStore {
    /// Wrap a pool whose collection table already exists
    pub fn new(pool: SqlitePool, collection: impl Into<String>) -> Result<Self> {
        let collection = collection.into();
        validate_collection_name(&collection)?;

        Ok(Self {
            pool,
            text_index: text_index_name(&collection),
            collection,
        })
    }

    /// Connect to the configured store and resolve its collection
    pub async fn connect(config: &BlobStoreConfig) -> Result<Self> {
        validate_collection_name(&config.collection)?;

        let pool = super::create_pool(config).await?;
        schema::initialize_collection(&pool, &config.collection).await?;

        Self::new(pool, config.collection.clone())
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn upsert(&self, blob: &BookBlob) -> Result<()> {
        sqlx::query(&format!(
            r#"
            INSERT INTO {} (book_id, content, book_intro, author_intro)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(book_id) DO UPDATE SET
                content = excluded.content,
                book_intro = excluded.book_intro,
                author_intro = excluded.author_intro
            "#,
            self.collection
        ))
        .bind(&blob.book_id)
        .bind(&blob.content)
        .bind(&blob.book_intro)
        .bind(&blob.author_intro)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Upserted blob for book: {}", blob.book_id);
        Ok(())
    }

    async fn find_one(&self, book_id: &str) -> Result<Option<BlobRecord>> {
        let record = sqlx::query_as::<_, BlobRecord>(&format!(
            "SELECT content, book_intro, author_intro FROM {} WHERE book_id = ?",
            self.collection
        ))
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn ensure_text_index(&self) -> Result<()> {
        schema::ensure_text_index(&self.pool, &self.collection).await?;
        Ok(())
    }

    async fn text_search(&self, keyword: &str) -> Result<Vec<String>> {
        let Some(expression) = TextQuery::parse(keyword).to_match_expression() else {
            tracing::debug!("Keyword has no searchable terms: {:?}", keyword);
            return Ok(Vec::new());
        };

        let index = &self.text_index;
        let collection = &self.collection;

        let book_ids: Vec<String> = sqlx::query_scalar(&format!(
            r#"
            SELECT {collection}.book_id
            FROM {index}
            JOIN {collection} ON {collection}._id = {index}.rowid
            WHERE {index} MATCH ?
            ORDER BY {index}.rank
            "#
        ))
        .bind(&expression)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Text search {:?} matched {} books", keyword, book_ids.len());
        Ok(book_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::initialize_collection;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_store() -> SqliteDocumentStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_collection(&pool, "book_content").await.unwrap();

        SqliteDocumentStore::new(pool, "book_content").unwrap()
    }

    async fn row_count(store: &SqliteDocumentStore, book_id: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM book_content WHERE book_id = ?")
            .bind(book_id)
            .fetch_one(&store.pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_upsert_and_find() {
        let store = create_test_store().await;

        store
            .upsert(&BookBlob::new("b1", "C", "BI", "AI"))
            .await
            .unwrap();

        let record = store.find_one("b1").await.unwrap().unwrap();
        assert_eq!(record, BookBlob::new("b1", "C", "BI", "AI").into_record());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let store = create_test_store().await;

        store
            .upsert(&BookBlob::new("b1", "first", "first intro", "first author"))
            .await
            .unwrap();
        store
            .upsert(&BookBlob::new("b1", "second", "", "second author"))
            .await
            .unwrap();

        assert_eq!(row_count(&store, "b1").await, 1);

        let record = store.find_one("b1").await.unwrap().unwrap();
        assert_eq!(record.content, "second");
        assert_eq!(record.book_intro, "");
        assert_eq!(record.author_intro, "second author");
    }

    #[tokio::test]
    async fn test_find_missing() {
        let store = create_test_store().await;

        assert!(store.find_one("nonexistent-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_text_search_across_fields() {
        let store = create_test_store().await;
        store.ensure_text_index().await.unwrap();

        store
            .upsert(&BookBlob::new("b1", "a story about dragons", "", ""))
            .await
            .unwrap();
        store
            .upsert(&BookBlob::new("b2", "", "an introduction to gardening", ""))
            .await
            .unwrap();
        store
            .upsert(&BookBlob::new("b3", "", "", "the author keeps dragons"))
            .await
            .unwrap();

        let mut hits = store.text_search("dragons").await.unwrap();
        hits.sort();
        assert_eq!(hits, vec!["b1", "b3"]);

        assert_eq!(store.text_search("gardening").await.unwrap(), vec!["b2"]);
        assert!(store.text_search("nonexistentword").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_text_search_follows_updates() {
        let store = create_test_store().await;
        store.ensure_text_index().await.unwrap();

        store
            .upsert(&BookBlob::new("b1", "castles and moats", "", ""))
            .await
            .unwrap();
        store
            .upsert(&BookBlob::new("b1", "rivers and lakes", "", ""))
            .await
            .unwrap();

        assert!(store.text_search("castles").await.unwrap().is_empty());
        assert_eq!(store.text_search("rivers").await.unwrap(), vec!["b1"]);
    }

    #[tokio::test]
    async fn test_text_search_stems_terms() {
        let store = create_test_store().await;
        store.ensure_text_index().await.unwrap();

        store
            .upsert(&BookBlob::new("b1", "the dragon slept", "", ""))
            .await
            .unwrap();

        assert_eq!(store.text_search("dragons").await.unwrap(), vec!["b1"]);
    }

    #[tokio::test]
    async fn test_text_search_exclusion() {
        let store = create_test_store().await;
        store.ensure_text_index().await.unwrap();

        store
            .upsert(&BookBlob::new("b1", "dragons in the mountains", "", ""))
            .await
            .unwrap();
        store
            .upsert(&BookBlob::new("b2", "dragons by the sea", "", ""))
            .await
            .unwrap();

        assert_eq!(
            store.text_search("dragons -mountains").await.unwrap(),
            vec!["b2"]
        );
        assert_eq!(
            store.text_search("\"by the sea\"").await.unwrap(),
            vec!["b2"]
        );
    }

    #[tokio::test]
    async fn test_text_search_without_terms() {
        let store = create_test_store().await;
        store.ensure_text_index().await.unwrap();

        store
            .upsert(&BookBlob::new("b1", "anything", "", ""))
            .await
            .unwrap();

        assert!(store.text_search("   ").await.unwrap().is_empty());
        assert!(store.text_search("-anything").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_text_search_requires_index() {
        let store = create_test_store().await;

        assert!(store.text_search("dragons").await.is_err());
    }
}
