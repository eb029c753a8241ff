//! Feedback repository implementations

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use senti_core::{Error, Feedback, FeedbackRepository, Result, newest_first};

/// Feedback kept in process memory only
#[derive(Debug, Default)]
pub struct InMemoryFeedbackRepository {
    entries: RwLock<Vec<Feedback>>,
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn save(&self, feedback: Feedback) -> Result<()> {
        self.entries.write().await.push(feedback);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Feedback>> {
        Ok(newest_first(self.entries.read().await.clone()))
    }
}

/// File-based feedback repository.
///
/// Entries are held in memory and the whole set is rewritten as a pretty
/// JSON array after every save.
#[derive(Debug)]
pub struct FileFeedbackRepository {
    entries: RwLock<Vec<Feedback>>,
    file_path: PathBuf,
}

impl FileFeedbackRepository {
    /// Open a repository, loading existing entries when the file exists.
    /// A file that exists but cannot be read or parsed is an error; it is
    /// left untouched so the next save cannot overwrite it.
    pub fn new(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        let mut entries = Vec::new();

        if file_path.exists() {
            entries = Self::load_sync(&file_path).map_err(|e| {
                warn!(path = %file_path.display(), error = %e, "failed to load feedback");
                Error::Storage(format!(
                    "cannot load feedback from {}: {}",
                    file_path.display(),
                    e
                ))
            })?;
        }

        debug!(path = %file_path.display(), count = entries.len(), "feedback repository opened");

        Ok(Self {
            entries: RwLock::new(entries),
            file_path,
        })
    }

    /// Load entries synchronously (for initialization)
    fn load_sync(path: &Path) -> Result<Vec<Feedback>> {
        let content = std::fs::read_to_string(path)?;
        let entries = serde_json::from_str(&content)?;
        Ok(entries)
    }
}

#[async_trait]
impl FeedbackRepository for FileFeedbackRepository {
    async fn save(&self, feedback: Feedback) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.push(feedback);

        let json = serde_json::to_string_pretty(&*entries)?;

        if let Err(e) = fs::write(&self.file_path, json).await {
            entries.pop();
            return Err(Error::Storage(format!(
                "failed to write {}: {}",
                self.file_path.display(),
                e
            )));
        }

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Feedback>> {
        Ok(newest_first(self.entries.read().await.clone()))
    }
}
