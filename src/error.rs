//! Error types for the fetch cache
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache and its fetch layer.
///
/// A cache miss is never an error; only misconfiguration and failures of the
/// surrounding fetch path end up here.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache constructed with a non-positive TTL
    #[error("Invalid TTL: {0:?} (must be greater than zero)")]
    InvalidTtl(Duration),

    /// Upstream base URL is not a usable absolute http(s) URL
    #[error("Invalid upstream base URL: {0}")]
    InvalidBaseUrl(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Key not present in the cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Transport-level failure talking to the upstream
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },

    /// Upstream payload did not decode as the expected JSON document
    #[error("Malformed upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Upstream(_)
            | CacheError::UpstreamStatus { .. }
            | CacheError::Decode(_) => StatusCode::BAD_GATEWAY,
            CacheError::InvalidTtl(_)
            | CacheError::InvalidBaseUrl(_)
            | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the fetch cache.
pub type Result<T> = std::result::Result<T, CacheError>;
