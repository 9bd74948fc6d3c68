use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{FeedbackEvent, FeedbackType, Item};

/// An item ranked by cross-user like count
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendingItem {
    pub item_id: String,
    pub like_count: usize,
    pub last_liked: DateTime<Utc>,
}

/// A (category, value) attribute pair ranked by like count
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttributeCount {
    pub category: String,
    pub value: String,
    pub like_count: usize,
}

/// Per-user like/dislike/neutral tallies
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserFeedbackSummary {
    pub user_id: String,
    pub likes: usize,
    pub dislikes: usize,
    pub neutral: usize,
}

/// The most-liked items overall, ties broken by most recent like, then id.
/// Read-side only; an empty history yields an empty list.
pub fn most_liked_items(events: &[FeedbackEvent], limit: usize) -> Vec<TrendingItem> {
    let mut tallies: BTreeMap<&str, (usize, DateTime<Utc>)> = BTreeMap::new();
    for event in events {
        if event.feedback_type != FeedbackType::Like {
            continue;
        }
        let entry = tallies
            .entry(event.item_id.as_str())
            .or_insert((0, event.timestamp));
        entry.0 += 1;
        entry.1 = entry.1.max(event.timestamp);
    }

    let mut ranked: Vec<TrendingItem> = tallies
        .into_iter()
        .map(|(item_id, (like_count, last_liked))| TrendingItem {
            item_id: item_id.to_string(),
            like_count,
            last_liked,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.like_count
            .cmp(&a.like_count)
            .then_with(|| b.last_liked.cmp(&a.last_liked))
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    ranked.truncate(limit);
    ranked
}

/// The most-liked attribute values across all items with feedback
pub fn top_attributes(
    events: &[FeedbackEvent],
    items_by_id: &HashMap<String, Item>,
    limit: usize,
) -> Vec<AttributeCount> {
    let mut tallies: BTreeMap<(String, String), usize> = BTreeMap::new();
    for event in events {
        if event.feedback_type != FeedbackType::Like {
            continue;
        }
        let Some(item) = items_by_id.get(&event.item_id) else {
            continue;
        };
        for (category, value) in &item.attributes {
            *tallies
                .entry((category.clone(), value.clone()))
                .or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<AttributeCount> = tallies
        .into_iter()
        .map(|((category, value), like_count)| AttributeCount {
            category,
            value,
            like_count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.like_count
            .cmp(&a.like_count)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.value.cmp(&b.value))
    });
    ranked.truncate(limit);
    ranked
}

/// Per-item like/dislike/neutral tallies
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItemFeedbackSummary {
    pub item_id: String,
    pub likes: usize,
    pub dislikes: usize,
    pub neutral: usize,
}

/// Counts feedback recorded for a single item
pub fn item_summary(events: &[FeedbackEvent], item_id: &str) -> ItemFeedbackSummary {
    let mut summary = ItemFeedbackSummary {
        item_id: item_id.to_string(),
        likes: 0,
        dislikes: 0,
        neutral: 0,
    };
    for event in events.iter().filter(|e| e.item_id == item_id) {
        match event.feedback_type {
            FeedbackType::Like => summary.likes += 1,
            FeedbackType::Dislike => summary.dislikes += 1,
            FeedbackType::Neutral => summary.neutral += 1,
        }
    }
    summary
}

/// Counts a single user's feedback by type
pub fn user_summary(events: &[FeedbackEvent], user_id: &str) -> UserFeedbackSummary {
    let mut summary = UserFeedbackSummary {
        user_id: user_id.to_string(),
        likes: 0,
        dislikes: 0,
        neutral: 0,
    };
    for event in events.iter().filter(|e| e.user_id == user_id) {
        match event.feedback_type {
            FeedbackType::Like => summary.likes += 1,
            FeedbackType::Dislike => summary.dislikes += 1,
            FeedbackType::Neutral => summary.neutral += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn at(days_ago: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap() - Duration::days(days_ago)
    }

    fn event(
        user: &str,
        item: &str,
        feedback_type: FeedbackType,
        days_ago: i64,
    ) -> FeedbackEvent {
        let mut e = FeedbackEvent::new(user, item, feedback_type);
        e.timestamp = at(days_ago);
        e
    }

    #[test]
    fn test_empty_history_yields_empty_aggregates() {
        assert!(most_liked_items(&[], 10).is_empty());
        assert!(top_attributes(&[], &HashMap::new(), 10).is_empty());
        let summary = user_summary(&[], "nobody");
        assert_eq!(summary.likes + summary.dislikes + summary.neutral, 0);
    }

    #[test]
    fn test_most_liked_ordering() {
        let events = vec![
            event("u1", "a", FeedbackType::Like, 3),
            event("u2", "a", FeedbackType::Like, 2),
            event("u1", "b", FeedbackType::Like, 1),
            event("u1", "c", FeedbackType::Like, 1),
            event("u1", "b", FeedbackType::Dislike, 0),
        ];
        let ranked = most_liked_items(&events, 10);
        assert_eq!(ranked[0].item_id, "a");
        assert_eq!(ranked[0].like_count, 2);
        // b and c tie at one like each with the same timestamp; id breaks it
        assert_eq!(ranked[1].item_id, "b");
        assert_eq!(ranked[2].item_id, "c");
    }

    #[test]
    fn test_tie_broken_by_recency_before_id() {
        let events = vec![
            event("u1", "z", FeedbackType::Like, 0),
            event("u1", "a", FeedbackType::Like, 5),
        ];
        let ranked = most_liked_items(&events, 10);
        assert_eq!(ranked[0].item_id, "z");
    }

    #[test]
    fn test_limit_respected() {
        let events: Vec<FeedbackEvent> = (0..10)
            .map(|i| event("u1", &format!("item{}", i), FeedbackType::Like, i))
            .collect();
        assert_eq!(most_liked_items(&events, 3).len(), 3);
    }

    #[test]
    fn test_top_attributes() {
        let items = HashMap::from([
            (
                "a".to_string(),
                Item::new("a", "vintage").with_attribute("era", "vintage"),
            ),
            (
                "b".to_string(),
                Item::new("b", "vintage")
                    .with_attribute("era", "vintage")
                    .with_attribute("fit", "slim"),
            ),
        ]);
        let events = vec![
            event("u1", "a", FeedbackType::Like, 1),
            event("u2", "b", FeedbackType::Like, 1),
            event("u3", "b", FeedbackType::Dislike, 0),
        ];
        let ranked = top_attributes(&events, &items, 10);
        assert_eq!(ranked[0].category, "era");
        assert_eq!(ranked[0].value, "vintage");
        assert_eq!(ranked[0].like_count, 2);
        assert_eq!(ranked[1].category, "fit");
        assert_eq!(ranked[1].like_count, 1);
    }

    #[test]
    fn test_item_summary_counts() {
        let events = vec![
            event("u1", "a", FeedbackType::Like, 1),
            event("u2", "a", FeedbackType::Like, 1),
            event("u3", "a", FeedbackType::Dislike, 1),
            event("u1", "b", FeedbackType::Like, 1),
        ];
        let summary = item_summary(&events, "a");
        assert_eq!(summary.likes, 2);
        assert_eq!(summary.dislikes, 1);
        assert_eq!(summary.neutral, 0);
    }

    #[test]
    fn test_user_summary_counts() {
        let events = vec![
            event("u1", "a", FeedbackType::Like, 1),
            event("u1", "b", FeedbackType::Dislike, 1),
            event("u1", "c", FeedbackType::Neutral, 1),
            event("u2", "a", FeedbackType::Like, 1),
        ];
        let summary = user_summary(&events, "u1");
        assert_eq!(summary.likes, 1);
        assert_eq!(summary.dislikes, 1);
        assert_eq!(summary.neutral, 1);
    }
}
