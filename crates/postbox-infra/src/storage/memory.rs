//! In-memory post storage - process-memory mode.

use async_trait::async_trait;
use tokio::sync::RwLock;

use postbox_core::StorageError;
use postbox_core::domain::Post;
use postbox_core::ports::PostStorage;

/// Post storage backed by a vector with an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostStorage {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStorage {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Start from an existing collection.
    pub fn seeded(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }
}

impl Default for InMemoryPostStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStorage for InMemoryPostStorage {
    async fn load(&self) -> Result<Vec<Post>, StorageError> {
        Ok(self.posts.read().await.clone())
    }

    async fn save(&self, posts: &[Post]) -> Result<(), StorageError> {
        *self.posts.write().await = posts.to_vec();
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(id: u64) -> Post {
        Post {
            id,
            title: "t".to_string(),
            content: "c".to_string(),
            author: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let storage = InMemoryPostStorage::new();
        assert!(storage.load().await.unwrap().is_empty());
        assert!(!storage.is_durable());
    }

    #[tokio::test]
    async fn test_save_replaces_collection() {
        let storage = InMemoryPostStorage::seeded(vec![post(1), post(2)]);
        storage.save(&[post(3)]).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), vec![post(3)]);
    }
}
