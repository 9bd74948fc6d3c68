use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};

use crate::config::EngineConfig;
use crate::models::{FeedbackEvent, FeedbackType, Item};

/// Derives per-category weight adjustments from a user's feedback history.
///
/// Pure with respect to its inputs: the same history, catalog snapshot, and
/// `now` always produce the same adjustments. Each like adds the configured
/// increment to every attribute category of the liked item, each dislike
/// subtracts it, and both are scaled by a linear recency factor that reaches
/// zero at the horizon. Events older than the horizon, neutral events, and
/// events for items missing from the snapshot contribute nothing. Final
/// per-category adjustments are clamped to the feedback ceiling.
pub fn derive_adjustments(
    events: &[FeedbackEvent],
    items_by_id: &HashMap<String, Item>,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> BTreeMap<String, f64> {
    let horizon = Duration::days(config.recency_horizon_days);
    if horizon <= Duration::zero() {
        return BTreeMap::new();
    }

    let mut adjustments: BTreeMap<String, f64> = BTreeMap::new();

    for event in events {
        let signum = match event.feedback_type {
            FeedbackType::Like => 1.0,
            FeedbackType::Dislike => -1.0,
            FeedbackType::Neutral => continue,
        };

        let age = now.signed_duration_since(event.timestamp).max(Duration::zero());
        if age >= horizon {
            continue;
        }
        let recency = 1.0 - age.num_seconds() as f64 / horizon.num_seconds() as f64;

        let Some(item) = items_by_id.get(&event.item_id) else {
            continue;
        };
        let delta = signum * config.feedback_increment * recency;
        for category in item.attributes.keys() {
            *adjustments.entry(category.clone()).or_insert(0.0) += delta;
        }
    }

    for adjustment in adjustments.values_mut() {
        *adjustment = adjustment.clamp(-config.feedback_ceiling, config.feedback_ceiling);
    }
    adjustments.retain(|_, adjustment| *adjustment != 0.0);
    adjustments
}
