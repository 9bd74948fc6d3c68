//! External collaborator interfaces.
//!
//! The engine is pure compute over snapshots; everything that does I/O lives
//! behind these traits. Required collaborators (catalog, feedback) have two
//! implementations: in-memory maps and JSON files on disk. Optional
//! collaborators (body-shape classifier, explanation generator) may be
//! absent entirely; their failure is an explicit `CollaboratorUnavailable`
//! the caller can branch on, never fabricated data.

use crate::error::AppResult;
use crate::models::{BodyShape, FeedbackEvent, Item, ScoredItem, StyleProfile};

mod json_file;
mod memory;

pub use json_file::{JsonFileCatalogStore, JsonFileFeedbackStore};
pub use memory::{InMemoryCatalogStore, InMemoryFeedbackStore};

/// Read/write access to the pool of scraped candidate items
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Stores an item, replacing any previous item with the same id
    async fn put_item(&self, item: Item) -> AppResult<()>;

    /// Fetches one item by id; `NotFound` if absent
    async fn item(&self, id: &str) -> AppResult<Item>;

    /// Items whose source keyword or attribute values match `keyword`
    /// (case-insensitive), sorted by id
    async fn items_by_keyword(&self, keyword: &str) -> AppResult<Vec<Item>>;

    /// Every stored item, sorted by id
    async fn all_items(&self) -> AppResult<Vec<Item>>;
}

/// Append-only log of feedback events
#[async_trait::async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Appends an event; `Duplicate` if the event id was already recorded
    async fn append(&self, event: FeedbackEvent) -> AppResult<()>;

    /// All events recorded for one user, oldest first
    async fn for_user(&self, user_id: &str) -> AppResult<Vec<FeedbackEvent>>;

    /// All events recorded for one item, oldest first
    async fn for_item(&self, item_id: &str) -> AppResult<Vec<FeedbackEvent>>;

    /// The full event log, oldest first
    async fn all(&self) -> AppResult<Vec<FeedbackEvent>>;
}

/// Optional vision collaborator inferring a body shape from an image.
/// Implementations return `CollaboratorUnavailable` on failure; the engine
/// proceeds without the signal.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BodyShapeClassifier: Send + Sync {
    async fn classify(&self, image: &[u8]) -> AppResult<BodyShape>;
}

/// Optional collaborator generating human-readable explanations. Purely
/// additive: its output never affects scoring or ranking.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ExplanationGenerator: Send + Sync {
    async fn explain(&self, profile: &StyleProfile, item: &ScoredItem) -> AppResult<String>;
}

/// Case-insensitive keyword match used by both catalog implementations
pub(crate) fn keyword_matches(item: &Item, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    let source = item.source_keyword.to_lowercase();
    source.contains(&keyword)
        || keyword.contains(&source)
        || item.attributes.values().any(|v| v == &keyword)
}
