//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Reaper: Removes entries older than the cache TTL once per TTL interval

mod reaper;

pub use reaper::{reap_once, spawn_reaper, ReaperHandle};
