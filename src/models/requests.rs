//! Request DTOs for the fetch cache API
//!
//! Query-string shapes accepted by the HTTP endpoints.

use serde::Deserialize;

/// Query for `GET /cache`
#[derive(Debug, Clone, Deserialize)]
pub struct KeyQuery {
    /// The cache key, used verbatim
    pub key: String,
}

impl KeyQuery {
    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}

/// Query for `GET /fetch`
#[derive(Debug, Clone, Deserialize)]
pub struct FetchQuery {
    /// Absolute URL, or a path relative to the upstream base URL
    pub url: String,
}

impl FetchQuery {
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("url cannot be empty".to_string());
        }
        None
    }
}

/// Query for `GET /locations`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationsQuery {
    /// A `next`/`previous` URL from a previous page
    #[serde(default)]
    pub page: Option<String>,
}
