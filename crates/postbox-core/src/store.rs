//! Post store - the single owner of the post collection.
//!
//! Every operation goes through the configured [`PostStorage`]: reads load a
//! snapshot, mutations run load, mutate, save as one unit under the write side
//! of the gate. The collection only changes once `save` has returned `Ok`.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::domain::{Field, Post, PostFields, Schema, next_id};
use crate::error::{DomainError, StorageError};
use crate::ports::PostStorage;
use crate::query::{self, SearchQuery, SortSpec};
use crate::validate::validate_new_post;

/// Source of "today" for post dates.
pub type Clock = fn() -> NaiveDate;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

pub struct PostStore {
    schema: Schema,
    storage: Arc<dyn PostStorage>,
    gate: RwLock<()>,
    clock: Clock,
}

impl PostStore {
    pub fn new(schema: Schema, storage: Arc<dyn PostStorage>) -> Self {
        Self {
            schema,
            storage,
            gate: RwLock::new(()),
            clock: utc_today,
        }
    }

    /// Replace the date source.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn is_durable(&self) -> bool {
        self.storage.is_durable()
    }

    /// All posts in insertion order.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let _read = self.gate.read().await;
        Ok(self.storage.load().await?)
    }

    pub async fn get(&self, id: u64) -> Result<Post, DomainError> {
        self.list()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound { id })
    }

    /// Validate `fields`, assign the next id and persist the new post.
    pub async fn create(&self, fields: PostFields) -> Result<Post, DomainError> {
        let fields = self.writable(fields);
        validate_new_post(&fields, &self.schema)?;

        let _write = self.gate.write().await;
        let mut posts = self.storage.load().await?;

        let id = next_id(&posts)
            .ok_or_else(|| StorageError::Corrupt("post id space exhausted".to_string()))?;
        let post = Post::new(id, fields, (self.clock)());
        posts.push(post.clone());
        self.storage.save(&posts).await?;

        tracing::debug!(post_id = post.id, "Post created");
        Ok(post)
    }

    /// Overwrite the fields present in `changes` and refresh the date.
    pub async fn update(&self, id: u64, changes: PostFields) -> Result<Post, DomainError> {
        let changes = self.writable(changes);

        let _write = self.gate.write().await;
        let mut posts = self.storage.load().await?;

        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound { id })?;
        post.apply(changes, (self.clock)());
        let updated = post.clone();

        self.storage.save(&posts).await?;

        tracing::debug!(post_id = id, "Post updated");
        Ok(updated)
    }

    /// Remove the post with `id`. Returns `false`, without saving, if there is none.
    pub async fn delete(&self, id: u64) -> Result<bool, DomainError> {
        let _write = self.gate.write().await;
        let mut posts = self.storage.load().await?;

        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Ok(false);
        }

        self.storage.save(&posts).await?;

        tracing::debug!(post_id = id, "Post deleted");
        Ok(true)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Post>, DomainError> {
        let posts = self.list().await?;
        Ok(query::search(&posts, query, &self.schema))
    }

    pub async fn sorted(&self, spec: SortSpec) -> Result<Vec<Post>, DomainError> {
        let posts = self.list().await?;
        Ok(query::sort(&posts, spec))
    }

    /// Drop fields this deployment's schema does not store.
    fn writable(&self, mut fields: PostFields) -> PostFields {
        if !self.schema.accepts(Field::Title) {
            fields.title = None;
        }
        if !self.schema.accepts(Field::Content) {
            fields.content = None;
        }
        if !self.schema.accepts(Field::Author) {
            fields.author = None;
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortDirection;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Vector-backed storage whose saves can be made to fail.
    #[derive(Default)]
    struct VecStorage {
        posts: Mutex<Vec<Post>>,
        fail_saves: AtomicBool,
    }

    #[async_trait]
    impl PostStorage for VecStorage {
        async fn load(&self) -> Result<Vec<Post>, StorageError> {
            Ok(self.posts.lock().unwrap().clone())
        }

        async fn save(&self, posts: &[Post]) -> Result<(), StorageError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StorageError::Io("disk full".to_string()));
            }
            *self.posts.lock().unwrap() = posts.to_vec();
            Ok(())
        }

        fn is_durable(&self) -> bool {
            false
        }
    }

    fn first_of_march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn tenth_of_march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn store(schema: Schema) -> (PostStore, Arc<VecStorage>) {
        let storage = Arc::new(VecStorage::default());
        let store = PostStore::new(schema, storage.clone()).with_clock(first_of_march);
        (store, storage)
    }

    fn fields(title: &str, content: &str, author: &str) -> PostFields {
        PostFields {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            author: Some(author.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_date() {
        let (store, _) = store(Schema::extended());

        let first = store.create(fields("One", "a", "ann")).await.unwrap();
        let second = store.create(fields("Two", "b", "bob")).await.unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(first.date, first_of_march());
        assert_eq!(store.list().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_ids_follow_max_after_deletes() {
        let (store, _) = store(Schema::extended());
        for n in 0..3 {
            store.create(fields(&format!("P{n}"), "x", "y")).await.unwrap();
        }

        assert!(store.delete(2).await.unwrap());
        assert_eq!(store.create(fields("P3", "x", "y")).await.unwrap().id, 4);

        assert!(store.delete(4).await.unwrap());
        assert_eq!(store.create(fields("P4", "x", "y")).await.unwrap().id, 4);

        assert!(store.delete(1).await.unwrap());
        assert!(store.delete(3).await.unwrap());
        assert!(store.delete(4).await.unwrap());
        assert_eq!(store.create(fields("P5", "x", "y")).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields_without_writing() {
        let (store, _) = store(Schema::minimal());

        let err = store
            .create(PostFields {
                title: Some(String::new()),
                content: Some(String::new()),
                author: None,
            })
            .await
            .unwrap_err();

        match err {
            DomainError::Validation { missing } => assert_eq!(missing, vec!["title", "content"]),
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_minimal_schema_drops_author() {
        let (store, _) = store(Schema::minimal());
        let post = store.create(fields("T", "C", "someone")).await.unwrap();
        assert_eq!(post.author, None);
    }

    #[tokio::test]
    async fn test_update_is_partial_and_refreshes_date() {
        let storage = Arc::new(VecStorage::default());
        let store = PostStore::new(Schema::extended(), storage.clone()).with_clock(first_of_march);
        store.create(fields("Title", "Old", "Ann")).await.unwrap();

        let store = PostStore::new(Schema::extended(), storage).with_clock(tenth_of_march);
        let updated = store
            .update(
                1,
                PostFields {
                    content: Some("New".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Title");
        assert_eq!(updated.author.as_deref(), Some("Ann"));
        assert_eq!(updated.content, "New");
        assert_eq!(updated.date, tenth_of_march());
        assert_eq!(store.get(1).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let (store, _) = store(Schema::extended());
        let err = store.update(9, PostFields::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id: 9 }));
    }

    #[tokio::test]
    async fn test_delete_miss_leaves_collection() {
        let (store, _) = store(Schema::extended());
        store.create(fields("A", "a", "a")).await.unwrap();
        let before = store.list().await.unwrap();

        assert!(!store.delete(42).await.unwrap());
        assert_eq!(store.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_collection() {
        let (store, storage) = store(Schema::extended());
        store.create(fields("A", "a", "a")).await.unwrap();
        storage.fail_saves.store(true, Ordering::SeqCst);

        assert!(matches!(
            store.create(fields("B", "b", "b")).await,
            Err(DomainError::Storage(_))
        ));
        assert!(matches!(store.delete(1).await, Err(DomainError::Storage(_))));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sorted_view_does_not_reorder_collection() {
        let (store, _) = store(Schema::extended());
        for title in ["banana", "Apple", "cherry"] {
            store.create(fields(title, "x", "y")).await.unwrap();
        }

        let spec = SortSpec {
            field: Field::Title,
            direction: SortDirection::Desc,
        };
        let titles: Vec<_> = store
            .sorted(spec)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["cherry", "banana", "Apple"]);

        let ids: Vec<_> = store.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_create_refuses_to_wrap_ids() {
        let (store, storage) = store(Schema::minimal());
        let last = Post::new(u64::MAX, fields("Last", "x", ""), first_of_march());
        storage.posts.lock().unwrap().push(last.clone());

        let err = store.create(fields("Next", "y", "")).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(StorageError::Corrupt(_))));
        assert_eq!(store.list().await.unwrap(), vec![last]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let (store, _) = store(Schema::minimal());
        let store = Arc::new(store);

        let tasks = (0..20).map(|n| {
            let store = store.clone();
            tokio::spawn(async move { store.create(fields(&format!("P{n}"), "x", "")).await })
        });
        let results = futures::future::join_all(tasks).await;

        let mut ids: Vec<u64> = results
            .into_iter()
            .map(|r| r.unwrap().unwrap().id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }
}
