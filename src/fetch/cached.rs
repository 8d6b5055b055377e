//! Cached Fetcher
//!
//! Cache-aside access to the upstream: look up the cache first, fetch on a
//! miss, and write back only payloads that were retrieved (and, for typed
//! reads, decoded) successfully.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::cache::TtlCache;
use crate::error::Result;
use crate::fetch::UpstreamClient;
use crate::models::{LocationPage, FIRST_LOCATION_PAGE};

/// Where a fetched payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from the cache without touching the upstream
    Hit,
    /// Fetched from the upstream and written back
    Miss,
}

impl CacheStatus {
    /// Header-friendly label.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// A payload returned by [`CachedFetcher::fetch`].
#[derive(Debug, Clone)]
pub struct Fetched {
    /// Full URL the payload is cached under
    pub url: String,
    /// The response body
    pub payload: Bytes,
    /// Whether the cache answered
    pub status: CacheStatus,
}

// == Cached Fetcher ==
/// Fetch layer that consults a [`TtlCache`] before calling the upstream.
#[derive(Debug, Clone)]
pub struct CachedFetcher {
    cache: Arc<TtlCache>,
    upstream: UpstreamClient,
}

impl CachedFetcher {
    /// Creates a fetcher over a shared cache and an upstream client.
    pub fn new(cache: Arc<TtlCache>, upstream: UpstreamClient) -> Self {
        Self { cache, upstream }
    }

    /// The cache backing this fetcher.
    pub fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    // == Fetch ==
    /// Returns the raw payload for `target`, from the cache when possible.
    ///
    /// Only successful (2xx) responses are cached.
    pub async fn fetch(&self, target: &str) -> Result<Fetched> {
        let (fetched, ()) = self.fetch_with(target, |_| Ok(())).await?;
        Ok(fetched)
    }

    // == Fetch JSON ==
    /// Returns `target` decoded as `T`.
    ///
    /// A payload is cached only after it decodes, so a malformed response
    /// never poisons the key.
    pub async fn fetch_json<T: DeserializeOwned>(&self, target: &str) -> Result<T> {
        let (_, value) = self
            .fetch_with(target, |payload| Ok(serde_json::from_slice(payload)?))
            .await?;
        Ok(value)
    }

    // == Locations ==
    /// Returns a page of the location listing.
    ///
    /// `page` is a `next`/`previous` URL from an earlier page; `None` loads the
    /// first page.
    pub async fn locations(&self, page: Option<&str>) -> Result<LocationPage> {
        self.fetch_json(page.unwrap_or(FIRST_LOCATION_PAGE)).await
    }

    /// Cached entries that fail `decode` are treated as misses and refetched.
    async fn fetch_with<T, F>(&self, target: &str, decode: F) -> Result<(Fetched, T)>
    where
        F: Fn(&[u8]) -> Result<T>,
    {
        let url = self.upstream.resolve(target)?;

        if let Some(payload) = self.cache.get(&url).await {
            match decode(&payload[..]) {
                Ok(value) => {
                    return Ok((
                        Fetched {
                            url,
                            payload,
                            status: CacheStatus::Hit,
                        },
                        value,
                    ));
                }
                Err(err) => {
                    warn!(url = %url, error = %err, "cached payload unusable, refetching");
                }
            }
        }

        // No lock is held here; the network call happens outside the cache.
        let payload = self.upstream.fetch(&url).await?;
        let value = decode(&payload[..])?;

        self.cache.put(url.clone(), payload.clone()).await;
        info!(url = %url, size = payload.len(), "cached upstream payload");

        Ok((
            Fetched {
                url,
                payload,
                status: CacheStatus::Miss,
            },
            value,
        ))
    }
}
