//! Application state and initialization
//!
//! Holds the process-wide [`BlobStore`]. Host applications either build an
//! [`AppState`] themselves and pass it around, or use [`blob_store`], which
//! connects once from the environment on first use.

use crate::config::BlobStoreConfig;
use crate::storage::BlobStore;
use tokio::sync::OnceCell;

static SHARED: OnceCell<AppState> = OnceCell::const_new();

/// Central state shared by every caller of the blob store
#[derive(Clone)]
pub struct AppState {
    pub blob_store: BlobStore,
}

impl AppState {
    /// Build an isolated state. Never fails; see [`BlobStore::connect`].
    pub async fn initialize(config: &BlobStoreConfig) -> Self {
        tracing::info!("Initializing blob store state");

        let blob_store = BlobStore::connect(config).await;

        if !blob_store.is_ready() {
            tracing::warn!("Blob store unavailable; blob operations will be no-ops");
        }

        Self { blob_store }
    }
}

/// The process-wide state, initialized from the environment on first access
pub async fn shared() -> &'static AppState {
    SHARED
        .get_or_init(|| async { AppState::initialize(&BlobStoreConfig::from_env()).await })
        .await
}

/// The process-wide blob store
pub async fn blob_store() -> &'static BlobStore {
    &shared().await.blob_store
}
