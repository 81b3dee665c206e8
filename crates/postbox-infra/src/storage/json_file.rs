//! Durable post storage - a single pretty-printed JSON document.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use postbox_core::StorageError;
use postbox_core::domain::Post;
use postbox_core::ports::PostStorage;

/// Post storage that keeps the collection in one JSON file.
///
/// Saves go to a temporary sibling file that is synced and then renamed over
/// the target, so readers see either the old document or the new one.
pub struct JsonFilePostStorage {
    path: PathBuf,
}

impl JsonFilePostStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "posts.json".to_string());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl PostStorage for JsonFilePostStorage {
    async fn load(&self) -> Result<Vec<Post>, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No post file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let posts: Vec<Post> = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        if posts.iter().any(|p| p.id == 0) {
            return Err(StorageError::Corrupt(format!(
                "post id 0 in {}",
                self.path.display()
            )));
        }

        let mut seen = HashSet::with_capacity(posts.len());
        if let Some(dup) = posts.iter().find(|p| !seen.insert(p.id)) {
            return Err(StorageError::Corrupt(format!(
                "duplicate post id {} in {}",
                dup.id,
                self.path.display()
            )));
        }

        Ok(posts)
    }

    async fn save(&self, posts: &[Post]) -> Result<(), StorageError> {
        let mut data = serde_json::to_vec_pretty(posts)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        data.push(b'\n');

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }

        let tmp = self.temp_path();
        if let Err(e) = write_atomic(&tmp, &self.path, &data).await {
            // Best effort: the target is untouched, only the temp file may linger.
            let _ = fs::remove_file(&tmp).await;
            tracing::error!(path = %self.path.display(), error = %e, "Failed to save posts");
            return Err(e);
        }

        tracing::debug!(path = %self.path.display(), count = posts.len(), "Posts saved");
        Ok(())
    }

    fn is_durable(&self) -> bool {
        true
    }
}

async fn write_atomic(tmp: &Path, final_path: &Path, data: &[u8]) -> Result<(), StorageError> {
    let io = |e: std::io::Error| StorageError::Io(e.to_string());

    let mut file = fs::File::create(tmp).await.map_err(io)?;
    file.write_all(data).await.map_err(io)?;
    file.sync_all().await.map_err(io)?;
    drop(file);

    fs::rename(tmp, final_path).await.map_err(io)?;

    #[cfg(unix)]
    if let Some(dir) = final_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::File::open(dir).await.map_err(io)?.sync_all().await.map_err(io)?;
    }

    Ok(())
}
