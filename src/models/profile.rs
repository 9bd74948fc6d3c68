use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body shape tag, optionally supplied by the external classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    Hourglass,
    Pear,
    Apple,
    Rectangle,
    InvertedTriangle,
}

impl FromStr for BodyShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "hourglass" => Ok(BodyShape::Hourglass),
            "pear" => Ok(BodyShape::Pear),
            "apple" => Ok(BodyShape::Apple),
            "rectangle" => Ok(BodyShape::Rectangle),
            "inverted_triangle" => Ok(BodyShape::InvertedTriangle),
            other => Err(format!("unknown body shape: {}", other)),
        }
    }
}

impl Display for BodyShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BodyShape::Hourglass => "hourglass",
            BodyShape::Pear => "pear",
            BodyShape::Apple => "apple",
            BodyShape::Rectangle => "rectangle",
            BodyShape::InvertedTriangle => "inverted_triangle",
        };
        write!(f, "{}", name)
    }
}

/// Normalized preference snapshot built per recommendation request.
///
/// `derived_weights` maps attribute category to a weight in [0, 1];
/// `category_targets` holds the canonical tag value the user prefers per
/// category. Both use ordered maps so scoring never depends on iteration
/// order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleProfile {
    pub declared_tags: BTreeSet<String>,
    pub body_shape: Option<BodyShape>,
    pub derived_weights: BTreeMap<String, f64>,
    pub category_targets: BTreeMap<String, String>,
}

/// A scored candidate with its per-category score breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredItem {
    pub item_id: String,
    pub score: f64,
    pub contributing_factors: BTreeMap<String, f64>,
}

/// Ranked recommendation output.
///
/// Invariants: scores are non-increasing in order and item ids are unique.
/// `degraded` is set when an optional collaborator (classifier, explanation
/// generator) failed and the result proceeded without its signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub items: Vec<ScoredItem>,
    pub generated_at: DateTime<Utc>,
    pub profile: StyleProfile,
    pub degraded: bool,
}

/// A deterministic grouping of recommended items into one wearable outfit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outfit {
    pub outfit_id: String,
    pub item_ids: Vec<String>,
    pub total_score: f64,
    pub style_cohesion: f64,
}
