use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    BodyShape, FeedbackEvent, FeedbackType, Item, Outfit, Recommendation, StyleProfile,
};
use crate::services::{profile, recommender, trending, weighting};
use crate::services::trending::{
    AttributeCount, ItemFeedbackSummary, TrendingItem, UserFeedbackSummary,
};

use super::AppState;

const DEFAULT_MAX_RECOMMENDATIONS: usize = 10;
const DEFAULT_TRENDING_LIMIT: usize = 10;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    pub source_keyword: String,
    pub raw_score_hint: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveProfileRequest {
    #[serde(default)]
    pub style: String,
    pub body_shape: Option<String>,
    /// Raw image bytes for the optional body-shape classifier
    pub image: Option<Vec<u8>>,
    /// When set, feedback-derived weights for this user are merged in
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolveProfileResponse {
    pub profile: StyleProfile,
    pub degraded: bool,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub user_id: String,
    #[serde(default)]
    pub style: String,
    pub body_shape: Option<String>,
    pub image: Option<Vec<u8>>,
    /// Restricts candidates to one scrape keyword; all items otherwise
    pub keyword: Option<String>,
    pub max_recommendations: Option<usize>,
    #[serde(default)]
    pub include_outfits: bool,
    #[serde(default)]
    pub explain: bool,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outfits: Option<Vec<Outfit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanations: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
pub struct RecordFeedbackRequest {
    pub user_id: String,
    pub item_id: String,
    pub feedback_type: FeedbackType,
    pub id: Option<Uuid>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub most_liked: Vec<TrendingItem>,
    pub top_attributes: Vec<AttributeCount>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Store a candidate item in the catalog
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let id = request
        .id
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let mut item = Item::new(id, request.source_keyword);
    for (category, value) in request.attributes {
        item = item.with_attribute(category, value);
    }
    if let Some(hint) = request.raw_score_hint {
        if !(0.0..=1.0).contains(&hint) {
            return Err(AppError::InvalidRequest(
                "raw_score_hint must be in [0, 1]".to_string(),
            ));
        }
        item = item.with_hint(hint);
    }

    state.catalog.put_item(item.clone()).await?;
    tracing::info!(item_id = %item.id, keyword = %item.source_keyword, "Item stored");
    Ok((StatusCode::CREATED, Json(item)))
}

/// List catalog items, optionally filtered by keyword
pub async fn get_items(
    State(state): State<AppState>,
    Query(query): Query<ItemsQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = match query.keyword {
        Some(keyword) => state.catalog.items_by_keyword(&keyword).await?,
        None => state.catalog.all_items().await?,
    };
    Ok(Json(items))
}

/// Fetch one catalog item by id
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> AppResult<Json<Item>> {
    Ok(Json(state.catalog.item(&item_id).await?))
}

/// Feedback tallies for one catalog item
pub async fn get_item_feedback(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> AppResult<Json<ItemFeedbackSummary>> {
    state.catalog.item(&item_id).await?;
    let events = state.feedback.for_item(&item_id).await?;
    Ok(Json(trending::item_summary(&events, &item_id)))
}

/// Resolve a style profile without producing a ranking
pub async fn resolve_profile(
    State(state): State<AppState>,
    Json(request): Json<ResolveProfileRequest>,
) -> AppResult<Json<ResolveProfileResponse>> {
    let (body_shape, degraded) =
        resolve_body_shape(&state, request.body_shape.as_deref(), request.image.as_deref())
            .await?;

    let adjustments = match &request.user_id {
        Some(user_id) => {
            let events = state.feedback.for_user(user_id).await?;
            let snapshot = catalog_snapshot(&state).await?;
            weighting::derive_adjustments(&events, &snapshot, Utc::now(), &state.engine)
        }
        None => BTreeMap::new(),
    };

    let profile = profile::resolve(&request.style, body_shape, &adjustments, &state.engine)?;
    Ok(Json(ResolveProfileResponse { profile, degraded }))
}

/// Run the full recommendation pipeline for a user
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    let (body_shape, mut degraded) =
        resolve_body_shape(&state, request.body_shape.as_deref(), request.image.as_deref())
            .await?;

    let events = state.feedback.for_user(&request.user_id).await?;
    let snapshot = catalog_snapshot(&state).await?;
    let adjustments =
        weighting::derive_adjustments(&events, &snapshot, Utc::now(), &state.engine);

    let resolved = profile::resolve(&request.style, body_shape, &adjustments, &state.engine)?;

    let candidates = match &request.keyword {
        Some(keyword) => state.catalog.items_by_keyword(keyword).await?,
        None => state.catalog.all_items().await?,
    };
    let max = request
        .max_recommendations
        .unwrap_or(DEFAULT_MAX_RECOMMENDATIONS);

    let mut recommendation = recommender::recommend(&resolved, &candidates, max, &state.engine)?;

    let outfits = request
        .include_outfits
        .then(|| recommender::group_outfits(&recommendation, &snapshot));

    let explanations = if request.explain {
        match &state.explainer {
            Some(explainer) => {
                let mut texts = BTreeMap::new();
                for scored in &recommendation.items {
                    match explainer.explain(&recommendation.profile, scored).await {
                        Ok(text) => {
                            texts.insert(scored.item_id.clone(), text);
                        }
                        Err(AppError::CollaboratorUnavailable(reason)) => {
                            tracing::warn!(%reason, "Explanation generator unavailable");
                            degraded = true;
                            break;
                        }
                        Err(e) => return Err(e),
                    }
                }
                Some(texts)
            }
            None => {
                degraded = true;
                None
            }
        }
    } else {
        None
    };

    recommendation.degraded = recommendation.degraded || degraded;

    tracing::info!(
        user_id = %request.user_id,
        returned = recommendation.items.len(),
        degraded = recommendation.degraded,
        "Recommendation generated"
    );

    Ok(Json(RecommendResponse {
        recommendation,
        outfits,
        explanations,
    }))
}

/// Append a feedback event for a known catalog item
pub async fn record_feedback(
    State(state): State<AppState>,
    Json(request): Json<RecordFeedbackRequest>,
) -> AppResult<(StatusCode, Json<FeedbackEvent>)> {
    // Reject feedback for items the catalog has never seen
    state.catalog.item(&request.item_id).await?;

    let mut event = FeedbackEvent::new(request.user_id, request.item_id, request.feedback_type);
    if let Some(id) = request.id {
        event.id = id;
    }
    if let Some(timestamp) = request.timestamp {
        event.timestamp = timestamp;
    }

    state.feedback.append(event.clone()).await?;
    tracing::info!(
        user_id = %event.user_id,
        item_id = %event.item_id,
        feedback = ?event.feedback_type,
        "Feedback recorded"
    );
    Ok((StatusCode::CREATED, Json(event)))
}

/// Cross-user trending aggregates
pub async fn get_trending(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> AppResult<Json<TrendingResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_TRENDING_LIMIT);
    let events = state.feedback.all().await?;
    let snapshot = catalog_snapshot(&state).await?;

    Ok(Json(TrendingResponse {
        most_liked: trending::most_liked_items(&events, limit),
        top_attributes: trending::top_attributes(&events, &snapshot, limit),
    }))
}

/// Per-user feedback summary
pub async fn get_user_feedback(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserFeedbackSummary>> {
    let events = state.feedback.for_user(&user_id).await?;
    Ok(Json(trending::user_summary(&events, &user_id)))
}

/// Point-in-time view of the whole catalog, keyed by item id
async fn catalog_snapshot(state: &AppState) -> AppResult<HashMap<String, Item>> {
    let items = state.catalog.all_items().await?;
    Ok(items.into_iter().map(|i| (i.id.clone(), i)).collect())
}

/// Derives the body-shape signal from an explicit tag or, failing that, the
/// optional classifier. Classifier failure or absence degrades gracefully:
/// the result is (no signal, degraded = true), never fabricated data.
async fn resolve_body_shape(
    state: &AppState,
    tag: Option<&str>,
    image: Option<&[u8]>,
) -> AppResult<(Option<BodyShape>, bool)> {
    if let Some(tag) = tag {
        let shape = tag
            .parse::<BodyShape>()
            .map_err(AppError::InvalidRequest)?;
        return Ok((Some(shape), false));
    }

    let Some(image) = image else {
        return Ok((None, false));
    };
    let Some(classifier) = &state.classifier else {
        tracing::warn!("Image supplied but no body-shape classifier configured");
        return Ok((None, true));
    };
    match classifier.classify(image).await {
        Ok(shape) => Ok((Some(shape), false)),
        Err(AppError::CollaboratorUnavailable(reason)) => {
            tracing::warn!(%reason, "Body-shape classifier unavailable");
            Ok((None, true))
        }
        Err(e) => Err(e),
    }
}
