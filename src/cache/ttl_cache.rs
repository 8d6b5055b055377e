//! TTL Cache Module
//!
//! The shared, lock-protected cache handed to the fetch layer. Owns its store
//! and the reaper that keeps it fresh.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, StatsCounters};
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_reaper, ReaperHandle};

// == TTL Cache ==
/// Time-bounded lookup cache with a background reaper.
///
/// Reads take the shared lock, writes and sweeps take the exclusive lock, and
/// no lock is ever held across I/O. An entry is removed by the first sweep
/// that runs more than `ttl` after it was written, so it stays visible for at
/// most `2 * ttl`.
///
/// Share it behind an `Arc`; dropping the last reference stops the reaper.
#[derive(Debug)]
pub struct TtlCache {
    store: Arc<RwLock<CacheStore>>,
    stats: Arc<StatsCounters>,
    ttl: Duration,
    reaper: ReaperHandle,
}

impl TtlCache {
    // == Constructor ==
    /// Creates a new cache and starts its reaper immediately.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidTtl`] when `ttl` is zero.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl(ttl));
        }

        let store = Arc::new(RwLock::new(CacheStore::new()));
        let stats = Arc::new(StatsCounters::new());
        let reaper = spawn_reaper(Arc::downgrade(&store), Arc::clone(&stats), ttl);

        Ok(Self {
            store,
            stats,
            ttl,
            reaper,
        })
    }

    // == Get ==
    /// Returns the payload stored under `key`, or `None` on a miss.
    ///
    /// The returned `Bytes` is an immutable view; later writes to the same key
    /// never change it.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let payload = self.store.read().await.get(key);

        match payload {
            Some(payload) => {
                debug!(key, "cache hit");
                self.stats.record_hit();
                Some(payload)
            }
            None => {
                debug!(key, "cache miss");
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores `payload` under `key`, replacing any existing entry and
    /// resetting its age.
    pub async fn put(&self, key: impl Into<String>, payload: impl Into<Bytes>) {
        let key = key.into();
        let payload = payload.into();
        debug!(key = %key, size = payload.len(), "cache put");

        self.store.write().await.put(key, payload);
    }

    // == Accessors ==
    /// The configured freshness window, which is also the reap interval.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Returns a snapshot of the cache counters.
    pub async fn stats(&self) -> CacheStats {
        let total_entries = self.len().await;
        self.stats.snapshot(total_entries)
    }

    // == Lifecycle ==
    /// Stops the reaper and waits for it to exit.
    ///
    /// The cache stays readable and writable afterwards; entries simply stop
    /// expiring.
    pub async fn stop(&self) {
        self.reaper.stop().await;
    }

    /// Returns true while the reaper task is alive.
    pub fn is_reaper_running(&self) -> bool {
        self.reaper.is_running()
    }
}
