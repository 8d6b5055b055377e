//! API Handlers
//!
//! HTTP request handlers for each fetch cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::fetch::{CachedFetcher, UpstreamClient};
use crate::models::{
    FetchQuery, HealthResponse, KeyQuery, LocationPage, LocationsQuery, StatsResponse,
};

/// Response header reporting whether `/fetch` was served from the cache.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

const OCTET_STREAM: &str = "application/octet-stream";

/// Application state shared across all handlers.
///
/// Wraps the fetch layer, which in turn holds the shared cache.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: CachedFetcher,
}

impl AppState {
    /// Creates a new AppState around an existing fetcher.
    pub fn new(fetcher: CachedFetcher) -> Self {
        Self { fetcher }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache (starting its reaper) and the upstream client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Arc::new(TtlCache::new(config.cache_ttl())?);
        let upstream = UpstreamClient::new(config.upstream_base_url.clone(), config.fetch_timeout())?;
        Ok(Self::new(CachedFetcher::new(cache, upstream)))
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<TtlCache> {
        self.fetcher.cache()
    }
}

/// Handler for GET /cache?key=...
///
/// Returns the raw cached payload for the key. Read-only: entries are only
/// ever written by the fetch layer.
pub async fn get_cache_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Response> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let payload = state
        .cache()
        .get(&query.key)
        .await
        .ok_or_else(|| CacheError::NotFound(query.key.clone()))?;

    Ok(([(header::CONTENT_TYPE, OCTET_STREAM)], payload).into_response())
}

/// Handler for GET /fetch?url=...
///
/// Serves the upstream resource through the cache. Failed fetches are
/// reported as 502 and leave the cache untouched.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Result<Response> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let fetched = state.fetcher.fetch(&query.url).await?;

    Ok((
        [
            (header::CONTENT_TYPE, OCTET_STREAM),
            (X_CACHE, fetched.status.as_str()),
        ],
        fetched.payload,
    )
        .into_response())
}

/// Handler for GET /locations[?page=...]
///
/// Returns one decoded page of the upstream location listing.
pub async fn locations_handler(
    State(state): State<AppState>,
    Query(query): Query<LocationsQuery>,
) -> Result<Json<LocationPage>> {
    let page = state.fetcher.locations(query.page.as_deref()).await?;
    Ok(Json(page))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache();
    let stats = cache.stats().await;

    Json(StatsResponse::new(&stats, cache.ttl().as_secs_f64()))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::from_reaper(state.cache().is_reaper_running()))
}
