//! Application state - shared across all handlers.

use std::sync::Arc;

use postbox_core::PostStore;
use postbox_core::ports::PostStorage;
use postbox_infra::{InMemoryPostStorage, JsonFilePostStorage};

use crate::config::{AppConfig, StorageMode};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostStore>,
}

impl AppState {
    /// Build the application state with the configured storage backend.
    pub fn new(config: &AppConfig) -> Self {
        let storage: Arc<dyn PostStorage> = match &config.storage {
            StorageMode::File(path) => {
                tracing::info!(path = %path.display(), "Durable mode: posts stored in JSON file");
                Arc::new(JsonFilePostStorage::new(path))
            }
            StorageMode::Memory => {
                tracing::warn!("Process-memory mode: posts are lost when the server stops");
                Arc::new(InMemoryPostStorage::new())
            }
        };

        tracing::info!(schema = config.schema.name, "Application state initialized");

        Self::from_store(PostStore::new(config.schema.clone(), storage))
    }

    pub fn from_store(store: PostStore) -> Self {
        Self {
            posts: Arc::new(store),
        }
    }
}
