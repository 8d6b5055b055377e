//! Fetch Cache - A time-bounded lookup cache for a slow upstream API
//!
//! Shields callers from redundant remote fetches while guaranteeing entries
//! are swept within two TTL intervals of being written.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
pub use error::{CacheError, Result};
pub use fetch::CachedFetcher;
