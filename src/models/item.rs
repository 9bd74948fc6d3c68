use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A scraped candidate clothing item.
///
/// Items are immutable once stored: the engine only reads them. `attributes`
/// maps a category name (color, fit, era, silhouette, ...) to a single tag
/// value. `raw_score_hint` is an optional relevance seed from scraping,
/// normalized to [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: String,
    pub attributes: BTreeMap<String, String>,
    pub source_keyword: String,
    #[serde(default)]
    pub raw_score_hint: Option<f64>,
}

impl Item {
    pub fn new(id: impl Into<String>, source_keyword: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
            source_keyword: source_keyword.into(),
            raw_score_hint: None,
        }
    }

    /// Adds an attribute tag, normalizing both sides to lowercase
    pub fn with_attribute(mut self, category: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(category.into().to_lowercase(), value.into().to_lowercase());
        self
    }

    pub fn with_hint(mut self, hint: f64) -> Self {
        self.raw_score_hint = Some(hint);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_normalized() {
        let item = Item::new("a", "vintage").with_attribute("Era", "Vintage");
        assert_eq!(item.attributes.get("era"), Some(&"vintage".to_string()));
    }

    #[test]
    fn test_item_serde_roundtrip() {
        let item = Item::new("a", "vintage")
            .with_attribute("era", "vintage")
            .with_hint(0.7);
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_hint_defaults_to_none() {
        let item: Item = serde_json::from_str(
            r#"{"id":"a","attributes":{},"source_keyword":"vintage"}"#,
        )
        .unwrap();
        assert_eq!(item.raw_score_hint, None);
    }
}
