//! HTTP surface.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | Articles from page 1 |
//! | `GET /cache` | [`CacheStatus`] of the shared scraper |
//! | `GET /{num_pages}` | Articles from pages `1..=num_pages` |
//!
//! Other methods on these routes are answered with `405 Method Not Allowed`.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::ScrapeError;
use crate::models::{Article, CacheStatus};
use crate::scraper::Scraper;
use crate::scrapers::PageFetcher;

/// Build the router around one shared scraper instance.
pub fn router<F>(scraper: Arc<Scraper<F>>) -> Router
where
    F: PageFetcher + 'static,
{
    Router::new()
        .route("/", get(front_page::<F>))
        .route("/cache", get(cache_status::<F>))
        .route("/{num_pages}", get(pages::<F>))
        .layer(TraceLayer::new_for_http())
        .with_state(scraper)
}

async fn front_page<F: PageFetcher>(
    State(scraper): State<Arc<Scraper<F>>>,
) -> Result<Json<Vec<Article>>, ScrapeError> {
    Ok(Json(scraper.get_articles(1).await?))
}

async fn cache_status<F: PageFetcher>(
    State(scraper): State<Arc<Scraper<F>>>,
) -> Json<CacheStatus> {
    Json(scraper.cache_status().await)
}

// The segment is taken as text so non-integers get a 422 rather than axum's
// default 400 for path rejections.
async fn pages<F: PageFetcher>(
    State(scraper): State<Arc<Scraper<F>>>,
    Path(segment): Path<String>,
) -> Result<Json<Vec<Article>>, ScrapeError> {
    let num_pages = parse_page_count(&segment)
        .ok_or_else(|| ScrapeError::InvalidPageNumber(segment.clone()))?;
    Ok(Json(scraper.get_articles(num_pages).await?))
}

/// Parse a page count, saturating integers that overflow `i64` so they are
/// still rejected as out of range rather than as non-integers.
fn parse_page_count(segment: &str) -> Option<i64> {
    let segment = segment.trim();
    if let Ok(n) = segment.parse::<i64>() {
        return Some(n);
    }
    let (negative, digits) = match segment.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, segment.strip_prefix('+').unwrap_or(segment)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}
