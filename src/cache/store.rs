//! Cache Store Module
//!
//! The plain entry map behind the cache. Locking lives one level up in
//! [`TtlCache`](super::TtlCache); this type only knows about keys, payloads and ages.

use std::collections::HashMap;

use bytes::Bytes;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::CacheEntry;

// == Cache Store ==
/// Mapping from opaque string key to cached entry.
///
/// Keys are compared byte for byte; no normalization is applied.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Put ==
    /// Inserts or replaces the entry for `key`, stamped with the current time.
    pub fn put(&mut self, key: String, payload: Bytes) {
        self.put_at(key, payload, Instant::now());
    }

    /// Inserts or replaces the entry for `key` with an explicit creation time.
    pub fn put_at(&mut self, key: String, payload: Bytes, created_at: Instant) {
        self.entries.insert(key, CacheEntry::created_at(payload, created_at));
    }

    // == Get ==
    /// Returns a shared view of the payload for `key`, if present.
    ///
    /// Staleness is not checked here; removal is the reaper's job.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.entries.get(key).map(|entry| entry.payload.clone())
    }

    // == Entry ==
    /// Returns the full entry for `key`, if present.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Reap ==
    /// Removes every entry created strictly before `cutoff`.
    ///
    /// Returns the removed keys.
    pub fn reap(&mut self, cutoff: Instant) -> Vec<String> {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_older_than(cutoff))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            debug!(key = %key, "cache entry reaped");
        }

        expired
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
