use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::models::{Item, StyleProfile};
use crate::services::vocabulary;

/// Computes the compatibility score for a (profile, item) pair.
///
/// Weighted sum over attribute categories present in both the profile and
/// the item: exact tag match contributes the full category weight, a
/// vocabulary-adjacent tag the configured partial value, anything else zero.
/// Categories the item lacks contribute nothing either way. The sum is then
/// blended with the item's scraped relevance hint, if any; scraped signals
/// are noisy, so the hint never gets more than its configured share. Result
/// is clamped to [0, 1], with the per-category breakdown alongside.
pub fn score(
    profile: &StyleProfile,
    item: &Item,
    config: &EngineConfig,
) -> (f64, BTreeMap<String, f64>) {
    let mut factors = BTreeMap::new();
    let mut raw = 0.0;

    for (category, weight) in &profile.derived_weights {
        let target = profile.category_targets.get(category);
        let matched = match item.attributes.get(category) {
            Some(item_value) => match target {
                Some(target) if target == item_value => 1.0,
                Some(target) if vocabulary::related(target, item_value) => {
                    config.partial_match_value
                }
                _ => 0.0,
            },
            // Unknown declared tokens carry no real category; they match an
            // item tagged with the same value under any category
            None => match target {
                Some(target)
                    if target == category
                        && item.attributes.values().any(|value| value == target) =>
                {
                    1.0
                }
                _ => 0.0,
            },
        };
        let partial = weight * matched;
        if partial > 0.0 {
            factors.insert(category.clone(), partial);
        }
        raw += partial;
    }

    let blended = match item.raw_score_hint {
        Some(hint) => {
            raw * (1.0 - config.hint_mix) + hint.clamp(0.0, 1.0) * config.hint_mix
        }
        None => raw,
    };

    (blended.clamp(0.0, 1.0), factors)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::services::profile::resolve;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn vintage_streetwear_profile() -> StyleProfile {
        resolve("vintage streetwear", None, &BTreeMap::new(), &config()).unwrap()
    }

    #[test]
    fn test_exact_match_beats_mismatch() {
        let profile = vintage_streetwear_profile();
        let a = Item::new("a", "vintage")
            .with_attribute("era", "vintage")
            .with_attribute("fit", "oversized");
        let b = Item::new("b", "vintage")
            .with_attribute("era", "modern")
            .with_attribute("fit", "slim");

        let (score_a, factors_a) = score(&profile, &a, &config());
        let (score_b, _) = score(&profile, &b, &config());
        assert!(score_a > score_b);
        assert!(factors_a.contains_key("era"));
    }

    #[test]
    fn test_related_match_is_partial() {
        let profile = vintage_streetwear_profile();
        let exact = Item::new("a", "vintage").with_attribute("era", "vintage");
        let adjacent = Item::new("b", "vintage").with_attribute("era", "retro");
        let unrelated = Item::new("c", "vintage").with_attribute("era", "y2k");

        let (s_exact, _) = score(&profile, &exact, &config());
        let (s_adjacent, _) = score(&profile, &adjacent, &config());
        let (s_unrelated, _) = score(&profile, &unrelated, &config());

        assert!(s_exact > s_adjacent);
        assert!(s_adjacent > s_unrelated);
        assert_eq!(s_unrelated, 0.0);
    }

    #[test]
    fn test_unknown_token_matches_by_value() {
        // "grunge" is not in the vocabulary; an item tagged grunge under any
        // category still matches, at the lower fallback weight
        let profile = resolve("vintage grunge", None, &BTreeMap::new(), &config()).unwrap();
        let tagged = Item::new("a", "grunge").with_attribute("style", "grunge");
        let untagged = Item::new("b", "grunge").with_attribute("style", "formal");

        let (s_tagged, factors) = score(&profile, &tagged, &config());
        let (s_untagged, _) = score(&profile, &untagged, &config());
        assert!(s_tagged > s_untagged);
        assert!(factors.contains_key("grunge"));
        // Fallback weight keeps the unknown token below the known one
        assert!(factors["grunge"] < profile.derived_weights["era"]);
    }

    #[test]
    fn test_missing_category_is_neutral() {
        let profile = vintage_streetwear_profile();
        let bare = Item::new("a", "vintage");
        let (s, factors) = score(&profile, &bare, &config());
        assert_eq!(s, 0.0);
        assert!(factors.is_empty());
    }

    #[test]
    fn test_hint_blending() {
        let profile = vintage_streetwear_profile();
        let hinted = Item::new("a", "vintage").with_hint(1.0);
        let unhinted = Item::new("b", "vintage");

        let (s_hinted, _) = score(&profile, &hinted, &config());
        let (s_unhinted, _) = score(&profile, &unhinted, &config());

        // No attribute matches, so the hinted item scores exactly hint_mix
        assert!((s_hinted - config().hint_mix).abs() < 1e-9);
        assert_eq!(s_unhinted, 0.0);
    }

    #[test]
    fn test_hint_cannot_dominate_matches() {
        let profile = vintage_streetwear_profile();
        let matching = Item::new("a", "vintage")
            .with_attribute("era", "vintage")
            .with_attribute("style", "streetwear");
        let hint_only = Item::new("b", "vintage").with_hint(1.0);

        let (s_match, _) = score(&profile, &matching, &config());
        let (s_hint, _) = score(&profile, &hint_only, &config());
        assert!(s_match > s_hint);
    }

    #[test]
    fn test_score_is_deterministic() {
        let profile = vintage_streetwear_profile();
        let item = Item::new("a", "vintage")
            .with_attribute("era", "vintage")
            .with_attribute("style", "urban")
            .with_hint(0.3);

        let (first, first_factors) = score(&profile, &item, &config());
        let (second, second_factors) = score(&profile, &item, &config());
        assert_eq!(first, second);
        assert_eq!(first_factors, second_factors);
    }

    #[test]
    fn test_score_bounded() {
        let profile = resolve(
            "vintage streetwear fitted wrap",
            Some(crate::models::BodyShape::Hourglass),
            &BTreeMap::new(),
            &config(),
        )
        .unwrap();
        let item = Item::new("a", "vintage")
            .with_attribute("era", "vintage")
            .with_attribute("style", "streetwear")
            .with_attribute("fit", "fitted")
            .with_attribute("silhouette", "wrap")
            .with_hint(1.0);
        let (s, _) = score(&profile, &item, &config());
        assert!((0.0..=1.0).contains(&s));
    }
}
