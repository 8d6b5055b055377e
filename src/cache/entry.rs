//! Cache Entry Module
//!
//! Defines the immutable record stored for each cached key.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A cached payload together with the moment it was stored.
///
/// Entries are never mutated; a `put` on an existing key swaps in a new entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub payload: Bytes,
    /// When the entry was written
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(payload: Bytes) -> Self {
        Self::created_at(payload, Instant::now())
    }

    /// Creates a new entry with an explicit creation time.
    pub fn created_at(payload: Bytes, created_at: Instant) -> Self {
        Self {
            payload,
            created_at,
        }
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Older Than ==
    /// Returns true when the entry was created strictly before `cutoff`.
    ///
    /// An entry created exactly at the cutoff survives.
    pub fn is_older_than(&self, cutoff: Instant) -> bool {
        self.created_at < cutoff
    }
}
