//! HTTP boundary for the cached news.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/news/air-pollution?limit=N` | Cached articles, first `N` (default 20, `N <= 0` for all) |

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::cache::NewsCache;
use crate::error::ApiError;
use crate::models::{ArticleRecord, NewsResponse};
use crate::scrapers::tengri::TengriScraper;

/// Result count used when the request has no `limit`.
pub const DEFAULT_LIMIT: i64 = 20;

#[derive(Debug, Clone)]
pub struct AppState {
    pub cache: Arc<NewsCache<TengriScraper>>,
    pub default_limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    limit: Option<i64>,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/news/air-pollution", get(air_pollution_news))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn air_pollution_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<NewsResponse>, ApiError> {
    let articles = state.cache.get().await?;
    let limit = query.limit.unwrap_or(state.default_limit);
    let results = apply_limit(&articles, limit);
    debug!(limit, returned = results.len(), cached = articles.len(), "Serving news");
    Ok(Json(NewsResponse { results }))
}

/// Copy out the first `limit` articles, or all of them when `limit <= 0`.
pub fn apply_limit(articles: &[ArticleRecord], limit: i64) -> Vec<ArticleRecord> {
    let take = usize::try_from(limit)
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(articles.len());
    articles.iter().take(take).cloned().collect()
}
