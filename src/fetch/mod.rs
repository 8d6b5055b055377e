//! Fetch Module
//!
//! The layer between callers and the upstream API. Owns the network calls;
//! the cache only ever sees payloads that came back successfully.

mod cached;
mod upstream;

pub use cached::{CacheStatus, CachedFetcher, Fetched};
pub use upstream::UpstreamClient;
