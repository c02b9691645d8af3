use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Creates the router serving the page and the JSON API
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/recommend", get(handlers::recommend_page))
        .route("/health", get(handlers::health_check))
        // JSON API
        .route("/api/recommendations", get(handlers::get_recommendations))
        .route("/api/titles", get(handlers::search_titles))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
