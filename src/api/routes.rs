use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/items", get(handlers::get_items))
        .route("/items", post(handlers::create_item))
        .route("/items/:item_id", get(handlers::get_item))
        .route("/items/:item_id/feedback", get(handlers::get_item_feedback))
        // Profile resolution
        .route("/query", post(handlers::resolve_profile))
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
        // Feedback
        .route("/feedback", post(handlers::record_feedback))
        .route("/users/:user_id/feedback", get(handlers::get_user_feedback))
        // Analytics
        .route("/trending", get(handlers::get_trending))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
