use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{FeedbackEvent, Item};

use super::{keyword_matches, CatalogStore, FeedbackStore};

/// In-process catalog backed by a `HashMap`
#[derive(Default)]
pub struct InMemoryCatalogStore {
    items: RwLock<HashMap<String, Item>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn put_item(&self, item: Item) -> AppResult<()> {
        self.items.write().await.insert(item.id.clone(), item);
        Ok(())
    }

    async fn item(&self, id: &str) -> AppResult<Item> {
        self.items
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("item {}", id)))
    }

    async fn items_by_keyword(&self, keyword: &str) -> AppResult<Vec<Item>> {
        let items = self.items.read().await;
        let mut matched: Vec<Item> = items
            .values()
            .filter(|item| keyword_matches(item, keyword))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matched)
    }

    async fn all_items(&self) -> AppResult<Vec<Item>> {
        let items = self.items.read().await;
        let mut all: Vec<Item> = items.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
}

/// In-process append-only feedback log
#[derive(Default)]
pub struct InMemoryFeedbackStore {
    events: RwLock<Vec<FeedbackEvent>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_duplicate(events: &[FeedbackEvent], id: Uuid) -> bool {
    events.iter().any(|e| e.id == id)
}

#[async_trait::async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn append(&self, event: FeedbackEvent) -> AppResult<()> {
        let mut events = self.events.write().await;
        if is_duplicate(&events, event.id) {
            return Err(AppError::Duplicate(format!("feedback event {}", event.id)));
        }
        events.push(event);
        Ok(())
    }

    async fn for_user(&self, user_id: &str) -> AppResult<Vec<FeedbackEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn for_item(&self, item_id: &str) -> AppResult<Vec<FeedbackEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn all(&self) -> AppResult<Vec<FeedbackEvent>> {
        Ok(self.events.read().await.clone())
    }
}
