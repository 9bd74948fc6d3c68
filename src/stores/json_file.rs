//! JSON-file backed stores.
//!
//! One JSON array per file (`items.json`, `feedback.json`) under a data
//! directory. Every operation reads the file fresh; writers rewrite the file
//! whole via a temp-file rename under the write half of an internal lock,
//! readers take the read half, so a store handle can be shared across
//! request tasks without lost updates or torn reads. Suitable for the small
//! catalogs this service works with; a real database belongs behind the same
//! traits.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{FeedbackEvent, Item};

use super::{keyword_matches, CatalogStore, FeedbackStore};

const ITEMS_FILE: &str = "items.json";
const FEEDBACK_FILE: &str = "feedback.json";

async fn load<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

// Rename is atomic on the same filesystem, so the target file is always
// either the old contents or the new, never truncated mid-write
async fn save<T: Serialize>(path: &Path, records: &[T]) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let contents = serde_json::to_string_pretty(records)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Catalog persisted to `<data_dir>/items.json`
pub struct JsonFileCatalogStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileCatalogStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(ITEMS_FILE),
            lock: RwLock::new(()),
        }
    }
}

#[async_trait::async_trait]
impl CatalogStore for JsonFileCatalogStore {
    async fn put_item(&self, item: Item) -> AppResult<()> {
        let _guard = self.lock.write().await;
        let mut items: Vec<Item> = load(&self.path).await?;
        items.retain(|existing| existing.id != item.id);
        items.push(item);
        save(&self.path, &items).await
    }

    async fn item(&self, id: &str) -> AppResult<Item> {
        let _guard = self.lock.read().await;
        let items: Vec<Item> = load(&self.path).await?;
        items
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::NotFound(format!("item {}", id)))
    }

    async fn items_by_keyword(&self, keyword: &str) -> AppResult<Vec<Item>> {
        let _guard = self.lock.read().await;
        let items: Vec<Item> = load(&self.path).await?;
        let mut matched: Vec<Item> = items
            .into_iter()
            .filter(|item| keyword_matches(item, keyword))
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matched)
    }

    async fn all_items(&self) -> AppResult<Vec<Item>> {
        let _guard = self.lock.read().await;
        let mut items: Vec<Item> = load(&self.path).await?;
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }
}

/// Feedback log persisted to `<data_dir>/feedback.json`
pub struct JsonFileFeedbackStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileFeedbackStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(FEEDBACK_FILE),
            lock: RwLock::new(()),
        }
    }
}

#[async_trait::async_trait]
impl FeedbackStore for JsonFileFeedbackStore {
    async fn append(&self, event: FeedbackEvent) -> AppResult<()> {
        let _guard = self.lock.write().await;
        let mut events: Vec<FeedbackEvent> = load(&self.path).await?;
        if events.iter().any(|e| e.id == event.id) {
            return Err(AppError::Duplicate(format!("feedback event {}", event.id)));
        }
        events.push(event);
        save(&self.path, &events).await
    }

    async fn for_user(&self, user_id: &str) -> AppResult<Vec<FeedbackEvent>> {
        let _guard = self.lock.read().await;
        let events: Vec<FeedbackEvent> = load(&self.path).await?;
        Ok(events.into_iter().filter(|e| e.user_id == user_id).collect())
    }

    async fn for_item(&self, item_id: &str) -> AppResult<Vec<FeedbackEvent>> {
        let _guard = self.lock.read().await;
        let events: Vec<FeedbackEvent> = load(&self.path).await?;
        Ok(events.into_iter().filter(|e| e.item_id == item_id).collect())
    }

    async fn all(&self) -> AppResult<Vec<FeedbackEvent>> {
        let _guard = self.lock.read().await;
        load(&self.path).await
    }
}
