//! Cache Module
//!
//! Provides a time-bounded in-memory cache with periodic reaping.

mod entry;
mod stats;
mod store;
mod ttl_cache;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::{CacheStats, StatsCounters};
pub use store::CacheStore;
pub use ttl_cache::TtlCache;
