use async_trait::async_trait;

use crate::domain::Post;
use crate::error::StorageError;

/// Persistence port - loads and saves the whole post collection.
///
/// Implementations must make `save` atomic for readers: a concurrent or later
/// `load` sees either the previous collection or the new one, never a mix.
#[async_trait]
pub trait PostStorage: Send + Sync {
    /// Load the collection in insertion order. Empty when nothing was saved yet.
    async fn load(&self) -> Result<Vec<Post>, StorageError>;

    /// Replace the stored collection with `posts`.
    async fn save(&self, posts: &[Post]) -> Result<(), StorageError>;

    /// Whether saved state survives a process restart.
    fn is_durable(&self) -> bool;
}
