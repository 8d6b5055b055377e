//! Reaper Task
//!
//! Background task that periodically sweeps entries older than the cache TTL.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::{CacheStore, StatsCounters};

// == Reaper Handle ==
/// Owner-side handle for a running reaper.
///
/// Dropping the handle signals the task to stop; [`ReaperHandle::stop`] also
/// waits for it to finish.
#[derive(Debug)]
pub struct ReaperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ReaperHandle {
    /// Signals the reaper to stop without waiting for it.
    pub fn signal_stop(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Signals the reaper and waits until the task has exited.
    ///
    /// Calling this more than once is harmless.
    pub async fn stop(&self) {
        self.signal_stop();

        let task = self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        if let Some(task) = task {
            // The loop never panics; a cancelled runtime is the only error here.
            let _ = task.await;
        }
    }

    /// Returns true while the background task is still alive.
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for ReaperHandle {
    fn drop(&mut self) {
        self.signal_stop();
    }
}

/// Spawns the reaper for `store`, sweeping every `ttl`.
///
/// The task only holds a weak reference to the store and exits on its own once
/// the store is gone, or as soon as the returned handle is stopped or dropped.
///
/// # Panics
/// Panics if `ttl` is zero or if called outside of a Tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::new()));
/// let reaper = spawn_reaper(Arc::downgrade(&store), Arc::new(StatsCounters::new()), ttl);
/// // Later, during shutdown:
/// reaper.stop().await;
/// ```
pub fn spawn_reaper(
    store: Weak<RwLock<CacheStore>>,
    stats: Arc<StatsCounters>,
    ttl: Duration,
) -> ReaperHandle {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(run_reaper(store, stats, ttl, shutdown_rx));

    ReaperHandle {
        shutdown_tx,
        task: Mutex::new(Some(task)),
    }
}

async fn run_reaper(
    store: Weak<RwLock<CacheStore>>,
    stats: Arc<StatsCounters>,
    ttl: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!(ttl_ms = ttl.as_millis() as u64, "Starting cache reaper");

    let mut ticker = tokio::time::interval(ttl);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately; the first sweep is one full TTL out.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let Some(live) = store.upgrade() else {
                    debug!("Cache store dropped, reaper exiting");
                    break;
                };
                reap_once(&live, &stats, ttl).await;
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    info!("Cache reaper stopped");
}

/// Runs a single sweep: removes every entry created more than `ttl` ago.
///
/// Returns the number of entries removed.
pub async fn reap_once(store: &RwLock<CacheStore>, stats: &StatsCounters, ttl: Duration) -> usize {
    let removed = {
        let mut guard = store.write().await;
        match Instant::now().checked_sub(ttl) {
            Some(cutoff) => guard.reap(cutoff).len(),
            // Clock younger than the TTL: nothing can be old enough yet
            None => 0,
        }
    };

    stats.record_reaped(removed);

    if removed > 0 {
        info!("Cache reap: removed {} expired entries", removed);
    } else {
        debug!("Cache reap: no expired entries found");
    }

    removed
}
