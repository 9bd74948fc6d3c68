use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Utc;

use crate::config::EngineConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Item, Outfit, Recommendation, ScoredItem, StyleProfile};
use crate::services::scoring;

const MAX_OUTFITS: usize = 5;

/// Scores, ranks, and diversifies candidate items into a recommendation.
///
/// Ordering is fully deterministic: descending score with exact ties broken
/// by item id, never by iteration order. The diversity filter caps how many
/// items sharing one dominant category may occupy the top-N; capped items
/// are deferred rather than dropped, and re-admitted in rank order when the
/// list would otherwise come up short.
pub fn recommend(
    profile: &StyleProfile,
    items: &[Item],
    max_recommendations: usize,
    config: &EngineConfig,
) -> AppResult<Recommendation> {
    if max_recommendations == 0 {
        return Err(AppError::InvalidRequest(
            "max_recommendations must be positive".to_string(),
        ));
    }
    if items.is_empty() {
        return Err(AppError::EmptyCatalog(
            "no candidate items to rank".to_string(),
        ));
    }

    let mut scored: Vec<ScoredItem> = Vec::with_capacity(items.len());
    let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id.as_str()) {
            continue;
        }
        let (score, contributing_factors) = scoring::score(profile, item, config);
        scored.push(ScoredItem {
            item_id: item.id.clone(),
            score,
            contributing_factors,
        });
    }
    sort_ranked(&mut scored);

    let cap = diversity_cap(max_recommendations, config);
    let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut picked: Vec<ScoredItem> = Vec::with_capacity(max_recommendations);
    let mut deferred: Vec<ScoredItem> = Vec::new();

    for candidate in scored {
        if picked.len() == max_recommendations {
            break;
        }
        match dominant_category(&candidate) {
            Some(category) if category_counts.get(category).copied().unwrap_or(0) >= cap => {
                deferred.push(candidate);
            }
            dominant => {
                if let Some(category) = dominant {
                    *category_counts.entry(category.to_string()).or_insert(0) += 1;
                }
                picked.push(candidate);
            }
        }
    }

    // Over-represented items stay eligible when the list would under-fill
    for candidate in deferred {
        if picked.len() == max_recommendations {
            break;
        }
        picked.push(candidate);
    }
    sort_ranked(&mut picked);

    tracing::debug!(
        candidates = items.len(),
        returned = picked.len(),
        cap,
        "Assembled recommendation"
    );

    Ok(Recommendation {
        items: picked,
        generated_at: Utc::now(),
        profile: profile.clone(),
        degraded: false,
    })
}

/// Groups recommended items into deterministic outfit combinations.
///
/// Items are bucketed by their `category` attribute in rank order; outfit
/// `i` takes the i-th best item of every non-exhausted bucket. Cohesion is
/// higher the fewer distinct `style` tags an outfit mixes.
pub fn group_outfits(
    recommendation: &Recommendation,
    items_by_id: &HashMap<String, Item>,
) -> Vec<Outfit> {
    let mut buckets: BTreeMap<String, Vec<&ScoredItem>> = BTreeMap::new();
    for scored in &recommendation.items {
        let category = items_by_id
            .get(&scored.item_id)
            .and_then(|item| item.attributes.get("category").cloned())
            .unwrap_or_else(|| "other".to_string());
        buckets.entry(category).or_default().push(scored);
    }

    let depth = buckets
        .values()
        .map(Vec::len)
        .max()
        .unwrap_or(0)
        .min(MAX_OUTFITS);

    let mut outfits = Vec::with_capacity(depth);
    for rank in 0..depth {
        let members: Vec<&ScoredItem> = buckets
            .values()
            .filter_map(|bucket| bucket.get(rank).copied())
            .collect();
        if members.is_empty() {
            break;
        }

        let total_score =
            members.iter().map(|m| m.score).sum::<f64>() / members.len() as f64;
        let styles: HashSet<&str> = members
            .iter()
            .filter_map(|m| items_by_id.get(&m.item_id))
            .filter_map(|item| item.attributes.get("style"))
            .map(String::as_str)
            .collect();
        let style_cohesion = (1.0 - 0.2 * styles.len() as f64).max(0.2);

        outfits.push(Outfit {
            outfit_id: format!("outfit_{}", rank + 1),
            item_ids: members.iter().map(|m| m.item_id.clone()).collect(),
            total_score,
            style_cohesion,
        });
    }
    outfits
}

fn sort_ranked(items: &mut [ScoredItem]) {
    items.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
}

fn diversity_cap(max_recommendations: usize, config: &EngineConfig) -> usize {
    (config.diversity_cap_fraction * max_recommendations as f64).ceil() as usize
}

/// The category with the largest score contribution, ties broken by name.
/// Items that matched nothing have no dominant category and are never capped.
fn dominant_category(scored: &ScoredItem) -> Option<&str> {
    scored
        .contributing_factors
        .iter()
        .max_by(|(cat_a, val_a), (cat_b, val_b)| {
            val_a
                .partial_cmp(val_b)
                .unwrap_or(Ordering::Equal)
                .then_with(|| cat_b.cmp(cat_a))
        })
        .map(|(category, _)| category.as_str())
}
