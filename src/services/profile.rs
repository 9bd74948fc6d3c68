use std::collections::{BTreeMap, BTreeSet};

use crate::config::EngineConfig;
use crate::error::{AppError, AppResult};
use crate::models::{BodyShape, StyleProfile};
use crate::services::vocabulary;

/// Resolves declared style text, an optional body shape, and feedback-derived
/// weight adjustments into a normalized `StyleProfile`.
///
/// Declared tokens carry base weight 1.0 (vocabulary hits) or the configured
/// fallback weight (unknown tokens), normalized to sum 1.0 across categories.
/// Body-shape boosts and feedback adjustments are then merged additively;
/// each adjustment is clamped to the feedback ceiling and final weights stay
/// in [0, 1]. Declared targets always win over body-shape targets for the
/// same category.
pub fn resolve(
    declared_style: &str,
    body_shape: Option<BodyShape>,
    feedback_adjustments: &BTreeMap<String, f64>,
    config: &EngineConfig,
) -> AppResult<StyleProfile> {
    let tokens: Vec<String> = declared_style
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if tokens.is_empty() && body_shape.is_none() {
        return Err(AppError::InvalidProfile(
            "a profile needs a declared style or a body shape".to_string(),
        ));
    }

    let mut declared_tags = BTreeSet::new();
    let mut weights: BTreeMap<String, f64> = BTreeMap::new();
    let mut targets: BTreeMap<String, String> = BTreeMap::new();

    for token in &tokens {
        match vocabulary::lookup(token) {
            Some((category, value)) => {
                declared_tags.insert(value.to_string());
                *weights.entry(category.to_string()).or_insert(0.0) += 1.0;
                targets
                    .entry(category.to_string())
                    .or_insert_with(|| value.to_string());
            }
            None => {
                // Unknown tokens become their own category, weighted lower
                declared_tags.insert(token.clone());
                *weights.entry(token.clone()).or_insert(0.0) += config.unknown_token_weight;
                targets.entry(token.clone()).or_insert_with(|| token.clone());
            }
        }
    }

    let total: f64 = weights.values().sum();
    if total > 0.0 {
        for weight in weights.values_mut() {
            *weight /= total;
        }
    }

    if let Some(shape) = body_shape {
        for (category, value) in vocabulary::body_shape_boosts(shape) {
            let weight = weights.entry(category.to_string()).or_insert(0.0);
            *weight = (*weight + config.body_shape_bonus).min(1.0);
            targets
                .entry(category.to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    for (category, adjustment) in feedback_adjustments {
        let adjustment = adjustment.clamp(-config.feedback_ceiling, config.feedback_ceiling);
        let weight = weights.entry(category.clone()).or_insert(0.0);
        *weight = (*weight + adjustment).clamp(0.0, 1.0);
    }

    Ok(StyleProfile {
        declared_tags,
        body_shape,
        derived_weights: weights,
        category_targets: targets,
    })
}
