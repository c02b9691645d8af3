use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use sources::TitleMatch;

use crate::error::{ServerError, ServerResult};
use crate::orchestrator::{MovieRecommendation, MAX_K};
use crate::render;

use super::AppState;

const DEFAULT_SEARCH_LIMIT: usize = 20;
const MAX_SEARCH_LIMIT: usize = 100;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendPageQuery {
    pub title: Option<String>,
    pub k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub title: String,
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub title: String,
    pub k: usize,
    pub recommendations: Vec<MovieRecommendation>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<usize>,
}

fn resolve_k(state: &AppState, k: Option<usize>) -> ServerResult<usize> {
    let k = k.unwrap_or(state.config.default_k);
    if !(1..=MAX_K).contains(&k) {
        return Err(ServerError::InvalidInput(format!(
            "k must be between 1 and {}, got {}",
            MAX_K, k
        )));
    }
    Ok(k)
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Landing page with the movie picker
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let titles = state.orchestrator.data_index().titles();
    Html(render::render_page(titles, None, state.config.default_k, None))
}

/// Picker plus recommendation cards for the selected title
pub async fn recommend_page(
    State(state): State<AppState>,
    Query(query): Query<RecommendPageQuery>,
) -> ServerResult<Html<String>> {
    let k = resolve_k(&state, query.k)?;

    let results = match query.title.as_deref() {
        Some(title) => Some(state.orchestrator.recommend_html(title, k).await?),
        None => None,
    };

    let titles = state.orchestrator.data_index().titles();
    Ok(Html(render::render_page(
        titles,
        query.title.as_deref(),
        k,
        results.as_deref(),
    )))
}

/// Recommendations as JSON
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendQuery>,
) -> ServerResult<Json<RecommendationsResponse>> {
    let k = resolve_k(&state, query.k)?;
    let recommendations = state.orchestrator.recommend(&query.title, k).await?;

    Ok(Json(RecommendationsResponse {
        title: query.title,
        k,
        recommendations,
    }))
}

/// Catalog title search, for autocomplete
pub async fn search_titles(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<TitleMatch>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT);
    let matches = sources::search_titles(state.orchestrator.data_index(), &query.q, limit);
    Json(matches)
}
