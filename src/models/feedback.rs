use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Explicit user reaction to a recommended item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Like,
    Dislike,
    Neutral,
}

/// A single feedback event. Append-only: events are never mutated or
/// deleted, and the engine only reads aggregates over them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackEvent {
    pub id: Uuid,
    pub user_id: String,
    pub item_id: String,
    pub feedback_type: FeedbackType,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackEvent {
    pub fn new(
        user_id: impl Into<String>,
        item_id: impl Into<String>,
        feedback_type: FeedbackType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            item_id: item_id.into(),
            feedback_type,
            timestamp: Utc::now(),
        }
    }
}
