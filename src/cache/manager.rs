//! The cache facade handed to the presentation layer.
//!
//! `DataCache` wires the store, coordinator, and scheduler together and owns
//! their lifecycle. It is an explicit instance: construct one at startup,
//! drop it at shutdown, build as many independent ones as tests need.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::ResourceFetcher;
use crate::config::CachePolicy;

use super::coordinator::QueryCoordinator;
use super::key::Volatility;
use super::scheduler::RevalidationScheduler;
use super::store::{CacheStore, Snapshot};
use super::QueryKey;

pub struct DataCache {
    store: Arc<Mutex<CacheStore>>,
    coordinator: QueryCoordinator,
    scheduler: Arc<RevalidationScheduler>,
}

/// Active interest in one key. Dropping it unregisters the callback and,
/// for the last subscriber of a volatile key, cancels the background timer.
pub struct Subscription {
    key: QueryKey,
    id: u64,
    store: Arc<Mutex<CacheStore>>,
    scheduler: Arc<RevalidationScheduler>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let remaining = self
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_subscriber(&self.key, self.id);
        if remaining == 0 && self.key.volatility() == Volatility::Live {
            self.scheduler.stop(&self.key);
        }
    }
}

impl DataCache {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, policy: CachePolicy) -> Self {
        let store = Arc::new(Mutex::new(CacheStore::new()));
        let interval = policy.revalidate_interval;
        let coordinator = QueryCoordinator::new(Arc::clone(&store), fetcher, policy);
        let scheduler = Arc::new(RevalidationScheduler::new(coordinator.clone(), interval));
        Self {
            store,
            coordinator,
            scheduler,
        }
    }

    fn store(&self) -> MutexGuard<'_, CacheStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current snapshot, revalidating in the background if stale or empty.
    pub fn resolve(&self, key: &QueryKey) -> Snapshot {
        self.coordinator.resolve(key)
    }

    /// Manual retry: always fetches, superseding any in-flight request.
    pub fn refresh(&self, key: &QueryKey) -> Snapshot {
        self.coordinator.refresh(key)
    }

    /// Current snapshot without any fetch side effect.
    pub fn snapshot(&self, key: &QueryKey) -> Snapshot {
        self.coordinator.snapshot(key)
    }

    /// Force the next read of this key to be treated as stale.
    pub fn invalidate(&self, key: &QueryKey) {
        self.coordinator.invalidate(key);
    }

    /// Register a callback invoked whenever the entry for `key` changes.
    /// The first subscriber to a volatile key starts its revalidation timer.
    pub fn subscribe<F>(&self, key: &QueryKey, callback: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let (id, count) = {
            let mut store = self.store();
            let id = store.add_subscriber(key, Arc::new(callback));
            (id, store.subscriber_count(key))
        };

        if count == 1 && key.volatility() == Volatility::Live {
            self.scheduler.start(key);
        }

        Subscription {
            key: key.clone(),
            id,
            store: Arc::clone(&self.store),
            scheduler: Arc::clone(&self.scheduler),
        }
    }

    #[cfg(test)]
    pub(crate) fn timer_running(&self, key: &QueryKey) -> bool {
        self.scheduler.is_running(key)
    }
}

impl Drop for DataCache {
    fn drop(&mut self) {
        self.scheduler.shutdown();
    }
}
