//! Fetch coordination: deduplication, retry, and late-response discard.
//!
//! `resolve` is non-blocking: it always returns the current snapshot
//! immediately and, when the entry needs revalidation, spawns at most one
//! fetch task per key. Results are written back through the store's entry
//! points, guarded by the per-key generation counter.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{ApiError, ResourceFetcher};
use crate::config::CachePolicy;

use super::store::{CacheStore, Snapshot};
use super::QueryKey;

/// Clone is cheap: all state sits behind one `Arc`, and fetch tasks hold a
/// clone for the duration of the request.
#[derive(Clone)]
pub struct QueryCoordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    store: Arc<Mutex<CacheStore>>,
    fetcher: Arc<dyn ResourceFetcher>,
    policy: CachePolicy,
}

impl QueryCoordinator {
    pub(crate) fn new(
        store: Arc<Mutex<CacheStore>>,
        fetcher: Arc<dyn ResourceFetcher>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                store,
                fetcher,
                policy,
            }),
        }
    }

    /// Store access. Entries are left consistent by every mutation, so a
    /// poisoned lock is still safe to reuse.
    fn store(&self) -> MutexGuard<'_, CacheStore> {
        self.inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the current snapshot; start a background fetch when the entry
    /// is stale or empty and no fetch is already outstanding. Concurrent
    /// calls for the same key collapse into a single request.
    pub fn resolve(&self, key: &QueryKey) -> Snapshot {
        let mut store = self.store();
        let snapshot = store.get(key);

        if snapshot.status == super::store::EntryStatus::Fresh {
            return snapshot;
        }
        if store.has_in_flight(key) {
            debug!(key = %key, "Joining in-flight fetch");
            return snapshot;
        }

        let generation = store.begin_fetch(key, key.ttl(&self.inner.policy));
        let snapshot = store.get(key);
        let notifications = store.subscribers_for(key);
        drop(store);

        for callback in notifications {
            callback(&snapshot);
        }
        self.spawn_fetch(key.clone(), generation);
        snapshot
    }

    /// Unconditionally start a new fetch, superseding any in-flight one.
    /// This is the manual-retry path: it bypasses both freshness and the
    /// automatic-retry-exhausted state.
    pub fn refresh(&self, key: &QueryKey) -> Snapshot {
        let mut store = self.store();
        let generation = store.begin_fetch(key, key.ttl(&self.inner.policy));
        let snapshot = store.get(key);
        let notifications = store.subscribers_for(key);
        drop(store);

        for callback in notifications {
            callback(&snapshot);
        }
        self.spawn_fetch(key.clone(), generation);
        snapshot
    }

    /// Current snapshot without triggering a fetch.
    pub fn snapshot(&self, key: &QueryKey) -> Snapshot {
        self.store().get(key)
    }

    pub fn invalidate(&self, key: &QueryKey) {
        let (notifications, snapshot) = {
            let mut store = self.store();
            let notifications = store.invalidate(key);
            (notifications, store.get(key))
        };
        for callback in notifications {
            callback(&snapshot);
        }
    }

    fn spawn_fetch(&self, key: QueryKey, generation: u64) {
        let coordinator = self.clone();
        tokio::spawn(async move {
            let result = coordinator.fetch_with_retry(&key).await;
            coordinator.settle(&key, generation, result);
        });
    }

    async fn fetch_with_retry(&self, key: &QueryKey) -> Result<Value, ApiError> {
        let mut attempt = 0u32;
        loop {
            match self.inner.fetcher.fetch(key).await {
                Ok(data) => return Ok(data),
                Err(e) if e.is_retryable() && attempt < self.inner.policy.retry_budget => {
                    attempt += 1;
                    debug!(key = %key, error = %e, attempt, "Fetch failed, retrying");
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Fetch failed");
                    return Err(e);
                }
            }
        }
    }

    /// Apply a settled fetch to the store, unless a newer fetch for the same
    /// key superseded it.
    fn settle(&self, key: &QueryKey, generation: u64, result: Result<Value, ApiError>) {
        let ttl = key.ttl(&self.inner.policy);
        let (notifications, snapshot) = {
            let mut store = self.store();
            if !store.accepts_generation(key, generation) {
                debug!(key = %key, generation, "Discarding superseded response");
                return;
            }
            let notifications = match result {
                Ok(data) => store.put(key, data, ttl),
                Err(e) => store.mark_error(key, e, ttl),
            };
            (notifications, store.get(key))
        };
        for callback in notifications {
            callback(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Notify;

    use super::super::store::EntryStatus;
    use super::*;

    fn key() -> QueryKey {
        QueryKey::Teams
    }

    /// Fetcher that plays back scripted responses indexed by call number
    /// and counts calls. An optional gate blocks a chosen call until
    /// released, so tests can control settlement order.
    struct ScriptedFetcher {
        calls: AtomicU32,
        script: Vec<Result<Value, ApiError>>,
        gate_on_call: Option<u32>,
        gate: Notify,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Result<Value, ApiError>>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                script,
                gate_on_call: None,
                gate: Notify::new(),
            })
        }

        fn gated(script: Vec<Result<Value, ApiError>>, gate_on_call: u32) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                script,
                gate_on_call: Some(gate_on_call),
                gate: Notify::new(),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ResourceFetcher for ScriptedFetcher {
        async fn fetch(&self, _key: &QueryKey) -> Result<Value, ApiError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.gate_on_call == Some(call) {
                self.gate.notified().await;
            }
            self.script
                .get(call as usize - 1)
                .cloned()
                .unwrap_or_else(|| Ok(json!(null)))
        }
    }

    fn server_fault() -> ApiError {
        ApiError::ServerFault {
            status: 503,
            message: "warming up".into(),
        }
    }

    fn coordinator(fetcher: Arc<dyn ResourceFetcher>) -> QueryCoordinator {
        QueryCoordinator::new(
            Arc::new(Mutex::new(CacheStore::new())),
            fetcher,
            CachePolicy::default(),
        )
    }

    /// Wait until no fetch is outstanding for the key.
    async fn settled(coordinator: &QueryCoordinator, key: &QueryKey) -> Snapshot {
        for _ in 0..1000 {
            tokio::time::sleep(Duration::from_millis(1)).await;
            let snapshot = coordinator.snapshot(key);
            if snapshot.status != EntryStatus::Loading {
                return snapshot;
            }
        }
        panic!("fetch never settled");
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_resolves_dedup_to_one_fetch() {
        let fetcher = ScriptedFetcher::new(vec![Ok(json!([{"id": 1}]))]);
        let coordinator = coordinator(fetcher.clone());

        for _ in 0..5 {
            coordinator.resolve(&key());
        }
        let snapshot = settled(&coordinator, &key()).await;

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(snapshot.status, EntryStatus::Fresh);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_hit_returns_without_fetch() {
        let fetcher = ScriptedFetcher::new(vec![Ok(json!([1]))]);
        let coordinator = coordinator(fetcher.clone());

        coordinator.resolve(&key());
        settled(&coordinator, &key()).await;

        let snapshot = coordinator.resolve(&key());
        assert_eq!(snapshot.status, EntryStatus::Fresh);
        tokio::task::yield_now().await;
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_fault_retried_once() {
        let fetcher = ScriptedFetcher::new(vec![Err(server_fault()), Ok(json!([2]))]);
        let coordinator = coordinator(fetcher.clone());

        coordinator.resolve(&key());
        let snapshot = settled(&coordinator, &key()).await;

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(snapshot.status, EntryStatus::Fresh);
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_rejection_not_retried() {
        let fetcher = ScriptedFetcher::new(vec![Err(ApiError::ClientRejected {
            status: 404,
            message: "no such resource".into(),
        })]);
        let coordinator = coordinator(fetcher.clone());

        coordinator.resolve(&key());
        let snapshot = settled(&coordinator, &key()).await;

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(snapshot.status, EntryStatus::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_surface_error_then_manual_refresh_works() {
        let fetcher = ScriptedFetcher::new(vec![
            Err(server_fault()),
            Err(server_fault()),
            Ok(json!([3])),
        ]);
        let coordinator = coordinator(fetcher.clone());

        coordinator.resolve(&key());
        let snapshot = settled(&coordinator, &key()).await;
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(snapshot.status, EntryStatus::Error);

        // Manual retry bypasses the exhausted-retry state
        coordinator.refresh(&key());
        let snapshot = settled(&coordinator, &key()).await;
        assert_eq!(fetcher.calls(), 3);
        assert_eq!(snapshot.status, EntryStatus::Fresh);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_revalidation_keeps_last_good_data() {
        let payload = json!([{"id": 9}]);
        let fetcher =
            ScriptedFetcher::new(vec![Ok(payload.clone()), Err(server_fault()), Err(server_fault())]);
        let coordinator = coordinator(fetcher.clone());

        coordinator.resolve(&key());
        settled(&coordinator, &key()).await;

        coordinator.refresh(&key());
        let snapshot = settled(&coordinator, &key()).await;

        assert_eq!(snapshot.status, EntryStatus::Error);
        assert_eq!(snapshot.data, Some(payload));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_guard_drops_superseded_response() {
        // First call is gated and would return the stale payload; the forced
        // second fetch settles first.
        let fetcher = ScriptedFetcher::gated(
            vec![Ok(json!({"v": "stale"})), Ok(json!({"v": "current"}))],
            1,
        );
        let coordinator = coordinator(fetcher.clone());

        coordinator.resolve(&key());
        tokio::task::yield_now().await;

        coordinator.refresh(&key());
        let snapshot = settled(&coordinator, &key()).await;
        assert_eq!(snapshot.data, Some(json!({"v": "current"})));

        // Release the stale first response; the generation guard must drop it
        fetcher.gate.notify_one();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let snapshot = coordinator.snapshot(&key());
        assert_eq!(snapshot.data, Some(json!({"v": "current"})));
        assert_eq!(snapshot.status, EntryStatus::Fresh);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_makes_next_resolve_fetch() {
        let fetcher = ScriptedFetcher::new(vec![Ok(json!([1])), Ok(json!([2]))]);
        let coordinator = coordinator(fetcher.clone());

        coordinator.resolve(&key());
        settled(&coordinator, &key()).await;
        coordinator.invalidate(&key());

        coordinator.resolve(&key());
        let snapshot = settled(&coordinator, &key()).await;
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(snapshot.data, Some(json!([2])));
    }
}
