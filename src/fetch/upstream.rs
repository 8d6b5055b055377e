//! Upstream Client
//!
//! Thin reqwest wrapper for the slow remote API the cache sits in front of.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Url;
use tracing::{debug, warn};

use crate::error::{CacheError, Result};

// == Upstream Client ==
/// Issues GET requests against the upstream API.
///
/// Every request stays under the configured base URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    base: Url,
}

impl UpstreamClient {
    /// Creates a client rooted at `base_url` with a per-request `timeout`.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidBaseUrl`] unless `base_url` is an absolute
    /// `http(s)` URL with a host.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        let base = Url::parse(&base_url)
            .map_err(|err| CacheError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if !matches!(base.scheme(), "http" | "https") || base.host_str().is_none() {
            return Err(CacheError::InvalidBaseUrl(base_url));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            base,
        })
    }

    /// The base URL relative targets are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Resolve ==
    /// Turns a fetch target into the full URL used as both request and cache key.
    ///
    /// Absolute `http(s)://` targets (scheme matched case-insensitively) pass
    /// through untouched but must lie under the base URL, as the upstream's own
    /// `next`/`previous` links do. Anything else is appended verbatim to the
    /// base URL.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidRequest`] for targets that would leave the
    /// upstream's origin.
    pub fn resolve(&self, target: &str) -> Result<String> {
        let url = if is_absolute(target) {
            let under_base = target
                .get(..self.base_url.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&self.base_url));
            if !under_base {
                return Err(CacheError::InvalidRequest(format!(
                    "target {target} is outside the upstream base URL"
                )));
            }
            target.to_string()
        } else {
            format!("{}{}", self.base_url, target)
        };

        // Catches userinfo/host tricks smuggled in through a relative target
        let same_origin = Url::parse(&url)
            .map(|parsed| parsed.origin() == self.base.origin())
            .unwrap_or(false);
        if !same_origin {
            return Err(CacheError::InvalidRequest(format!(
                "target {target} does not resolve to the upstream host"
            )));
        }

        Ok(url)
    }

    // == Fetch ==
    /// Fetches `url` and returns the raw body.
    ///
    /// # Errors
    /// Transport failures map to [`CacheError::Upstream`]; any non-2xx status
    /// maps to [`CacheError::UpstreamStatus`].
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        debug!(url, "fetching from upstream");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(url, status = status.as_u16(), "upstream returned error status");
            return Err(CacheError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}

fn is_absolute(target: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        target
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
