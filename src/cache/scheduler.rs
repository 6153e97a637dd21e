//! Fixed-interval revalidation for volatile resources.
//!
//! A timer exists only while someone is subscribed to the key: the facade
//! calls `start` on the 0→1 subscriber transition and `stop` on 1→0. Keys
//! outside the volatile class never get a timer; they revalidate on demand
//! through natural staleness.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::coordinator::QueryCoordinator;
use super::QueryKey;

pub struct RevalidationScheduler {
    coordinator: QueryCoordinator,
    interval: Duration,
    timers: Mutex<HashMap<QueryKey, JoinHandle<()>>>,
}

impl RevalidationScheduler {
    pub(crate) fn new(coordinator: QueryCoordinator, interval: Duration) -> Self {
        Self {
            coordinator,
            interval,
            timers: Mutex::new(HashMap::new()),
        }
    }

    fn timers(&self) -> MutexGuard<'_, HashMap<QueryKey, JoinHandle<()>>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start the interval timer for a key. Idempotent: an already-running
    /// timer is left alone.
    pub(crate) fn start(&self, key: &QueryKey) {
        let mut timers = self.timers();
        if timers.contains_key(key) {
            return;
        }

        debug!(key = %key, interval_secs = self.interval.as_secs(), "Starting revalidation timer");
        let coordinator = self.coordinator.clone();
        let task_key = key.clone();
        let period = self.interval;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately; the subscriber's own
            // resolve already covers that read.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                coordinator.refresh(&task_key);
            }
        });
        timers.insert(key.clone(), handle);
    }

    /// Cancel the timer for a key, if any.
    pub(crate) fn stop(&self, key: &QueryKey) {
        if let Some(handle) = self.timers().remove(key) {
            debug!(key = %key, "Stopping revalidation timer");
            handle.abort();
        }
    }

    pub(crate) fn is_running(&self, key: &QueryKey) -> bool {
        self.timers().contains_key(key)
    }

    /// Abort every timer. Called when the owning cache is torn down.
    pub(crate) fn shutdown(&self) {
        let mut timers = self.timers();
        for (_, handle) in timers.drain() {
            handle.abort();
        }
    }
}

impl Drop for RevalidationScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
