//! Collection schema and full-text index
//!
//! A collection is a table with a storage-internal `_id` rowid and a unique
//! `book_id`. Its text index is an external-content FTS5 table kept in sync
//! by triggers, created lazily on first search.

use crate::error::{Result, StoreError};
use sqlx::SqlitePool;

/// Collection names are interpolated into SQL, so only plain identifiers pass.
pub fn validate_collection_name(collection: &str) -> Result<()> {
    let mut chars = collection.chars();

    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }
}

/// Name of the FTS5 table indexing a collection
pub fn text_index_name(collection: &str) -> String {
    format!("{}_text", collection)
}

/// Create the collection table if it does not exist yet
pub async fn initialize_collection(pool: &SqlitePool, collection: &str) -> Result<()> {
    validate_collection_name(collection)?;

    tracing::info!("Initializing blob collection: {}", collection);

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {collection} (
            _id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id TEXT NOT NULL UNIQUE,
            content TEXT NOT NULL DEFAULT '',
            book_intro TEXT NOT NULL DEFAULT '',
            author_intro TEXT NOT NULL DEFAULT ''
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

/// Make sure the combined text index over `content`, `book_intro` and
/// `author_intro` exists.
///
/// Returns `true` when this call created the index. A newly created index is
/// rebuilt from the rows already in the collection. Calling this on an
/// indexed collection only costs one catalog lookup.
pub async fn ensure_text_index(pool: &SqlitePool, collection: &str) -> Result<bool> {
    validate_collection_name(collection)?;
    let index = text_index_name(collection);

    let existing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(&index)
            .fetch_one(pool)
            .await?;

    if existing > 0 {
        return Ok(false);
    }

    tracing::info!("Creating text index {} on {}", index, collection);

    // Every statement is IF NOT EXISTS, so a concurrent creator only
    // costs a redundant rebuild
    let mut tx = pool.begin().await?;

    for statement in text_index_statements(collection, &index) {
        sqlx::query(&statement).execute(&mut *tx).await?;
    }

    sqlx::query(&format!("INSERT INTO {index}({index}) VALUES ('rebuild')"))
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!("Text index {} created", index);

    Ok(true)
}

fn text_index_statements(collection: &str, index: &str) -> Vec<String> {
    vec![
        format!(
            r#"
            CREATE VIRTUAL TABLE IF NOT EXISTS {index} USING fts5(
                content,
                book_intro,
                author_intro,
                content='{collection}',
                content_rowid='_id',
                tokenize='porter unicode61'
            )
            "#
        ),
        format!(
            r#"
            CREATE TRIGGER IF NOT EXISTS {index}_ai AFTER INSERT ON {collection} BEGIN
                INSERT INTO {index}(rowid, content, book_intro, author_intro)
                VALUES (new._id, new.content, new.book_intro, new.author_intro);
            END
            "#
        ),
        format!(
            r#"
            CREATE TRIGGER IF NOT EXISTS {index}_ad AFTER DELETE ON {collection} BEGIN
                INSERT INTO {index}({index}, rowid, content, book_intro, author_intro)
                VALUES ('delete', old._id, old.content, old.book_intro, old.author_intro);
            END
            "#
        ),
        format!(
            r#"
            CREATE TRIGGER IF NOT EXISTS {index}_au AFTER UPDATE ON {collection} BEGIN
                INSERT INTO {index}({index}, rowid, content, book_intro, author_intro)
                VALUES ('delete', old._id, old.content, old.book_intro, old.author_intro);
                INSERT INTO {index}(rowid, content, book_intro, author_intro)
                VALUES (new._id, new.content, new.book_intro, new.author_intro);
            END
            "#
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    async fn table_count(pool: &SqlitePool, name: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE name = ?")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[test]
    fn test_validate_collection_name() {
        assert!(validate_collection_name("book_content").is_ok());
        assert!(validate_collection_name("_private2").is_ok());

        assert!(validate_collection_name("").is_err());
        assert!(validate_collection_name("2books").is_err());
        assert!(validate_collection_name("books; DROP TABLE x").is_err());
        assert!(validate_collection_name("book-content").is_err());
    }

    #[tokio::test]
    async fn test_initialize_collection_is_repeatable() {
        let pool = create_test_pool().await;

        initialize_collection(&pool, "book_content").await.unwrap();
        initialize_collection(&pool, "book_content").await.unwrap();

        assert_eq!(table_count(&pool, "book_content").await, 1);
    }

    #[tokio::test]
    async fn test_ensure_text_index_creates_once() {
        let pool = create_test_pool().await;
        initialize_collection(&pool, "book_content").await.unwrap();

        assert!(ensure_text_index(&pool, "book_content").await.unwrap());
        assert!(!ensure_text_index(&pool, "book_content").await.unwrap());

        assert_eq!(table_count(&pool, "book_content_text").await, 1);
        assert_eq!(table_count(&pool, "book_content_text_au").await, 1);
    }

    #[tokio::test]
    async fn test_ensure_text_index_indexes_existing_rows() {
        let pool = create_test_pool().await;
        initialize_collection(&pool, "book_content").await.unwrap();

        sqlx::query("INSERT INTO book_content (book_id, content) VALUES ('early', 'written before the index')")
            .execute(&pool)
            .await
            .unwrap();

        ensure_text_index(&pool, "book_content").await.unwrap();

        let hits: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_content_text WHERE book_content_text MATCH 'index'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(hits, 1);
    }

    #[tokio::test]
    async fn test_ensure_text_index_rejects_bad_collection() {
        let pool = create_test_pool().await;

        let result = ensure_text_index(&pool, "bad name").await;
        assert!(matches!(result, Err(StoreError::InvalidCollection(_))));
    }
}
