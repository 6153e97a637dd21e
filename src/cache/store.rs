//! Keyed cache entries, freshness state, and subscriber notification.
//!
//! The store is the single mutable resource in the layer. All mutation goes
//! through `put`, `mark_error`, and `invalidate` (plus the crate-internal
//! fetch bookkeeping); nothing outside this module touches an entry's fields.
//! Mutating calls return the subscriber callbacks to notify so the caller can
//! invoke them after releasing the lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::api::ApiError;

use super::QueryKey;

/// Observable state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Empty,
    Loading,
    Fresh,
    Stale,
    Error,
}

/// Point-in-time view of one entry, handed to consumers and subscribers.
/// `data` can be present in any non-Empty status: a stale or errored entry
/// still serves its last good payload.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub status: EntryStatus,
    pub data: Option<Value>,
    pub error: Option<ApiError>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            status: EntryStatus::Empty,
            data: None,
            error: None,
            fetched_at: None,
        }
    }

    /// Deserialize the cached payload into a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        let value = self.data.as_ref()?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!(error = %e, "Failed to decode cached payload");
                None
            }
        }
    }

    pub fn age_minutes(&self) -> Option<i64> {
        self.fetched_at.map(|at| (Utc::now() - at).num_minutes())
    }

    pub fn age_display(&self) -> String {
        let minutes = match self.age_minutes() {
            Some(m) => m,
            None => return "never".to_string(),
        };
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else {
            format!("{}h ago", minutes / 60)
        }
    }
}

struct CacheEntry {
    data: Option<Value>,
    fetched_at: Option<DateTime<Utc>>,
    ttl: Duration,
    status: EntryStatus,
    last_error: Option<ApiError>,
    invalidated: bool,
    /// Bumped on every fetch started for this key. A response is applied
    /// only if its generation still matches; anything older was superseded.
    generation: u64,
    /// Generation of the outstanding fetch, if any.
    in_flight: Option<u64>,
}

impl CacheEntry {
    fn new(ttl: Duration) -> Self {
        Self {
            data: None,
            fetched_at: None,
            ttl,
            status: EntryStatus::Empty,
            last_error: None,
            invalidated: false,
            generation: 0,
            in_flight: None,
        }
    }

    fn expired(&self, now: DateTime<Utc>) -> bool {
        match self.fetched_at {
            Some(at) => {
                let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
                now - at > ttl
            }
            None => true,
        }
    }

    fn snapshot(&self, now: DateTime<Utc>) -> Snapshot {
        let status = match self.status {
            EntryStatus::Fresh if self.invalidated || self.expired(now) => EntryStatus::Stale,
            other => other,
        };
        Snapshot {
            status,
            data: self.data.clone(),
            error: self.last_error.clone(),
            fetched_at: self.fetched_at,
        }
    }
}

pub type SubscriberFn = dyn Fn(&Snapshot) + Send + Sync;

/// Callbacks owed a notification after a mutation. Invoke after dropping the
/// store lock; the callbacks run consumer code.
pub type Notifications = Vec<Arc<SubscriberFn>>;

pub struct CacheStore {
    entries: HashMap<QueryKey, CacheEntry>,
    subscribers: HashMap<QueryKey, Vec<(u64, Arc<SubscriberFn>)>>,
    next_subscriber_id: u64,
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            subscribers: HashMap::new(),
            next_subscriber_id: 0,
        }
    }

    /// Current snapshot for a key. Never triggers a fetch; a never-seen key
    /// reports Empty.
    pub fn get(&self, key: &QueryKey) -> Snapshot {
        match self.entries.get(key) {
            Some(entry) => entry.snapshot(Utc::now()),
            None => Snapshot::empty(),
        }
    }

    /// Store a successful fetch result: entry becomes Fresh as of now.
    pub fn put(&mut self, key: &QueryKey, data: Value, ttl: Duration) -> Notifications {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(ttl));
        entry.data = Some(data);
        entry.fetched_at = Some(Utc::now());
        entry.ttl = ttl;
        entry.status = EntryStatus::Fresh;
        entry.last_error = None;
        entry.invalidated = false;
        entry.in_flight = None;
        debug!(key = %key, "Cache entry refreshed");
        self.subscribers_for(key)
    }

    /// Record a fetch failure. Previously cached data stays servable
    /// (stale-while-error); only the status and error change.
    pub fn mark_error(&mut self, key: &QueryKey, error: ApiError, ttl: Duration) -> Notifications {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(ttl));
        entry.status = EntryStatus::Error;
        entry.last_error = Some(error);
        entry.in_flight = None;
        debug!(key = %key, "Cache entry marked errored");
        self.subscribers_for(key)
    }

    /// Whether the entry needs revalidation at `now`. Empty, errored, and
    /// invalidated entries are always stale.
    pub fn is_stale(&self, key: &QueryKey, now: DateTime<Utc>) -> bool {
        match self.entries.get(key) {
            Some(entry) => match entry.status {
                EntryStatus::Empty | EntryStatus::Error => true,
                _ => entry.invalidated || entry.expired(now),
            },
            None => true,
        }
    }

    /// Force the next read to treat this entry as stale regardless of TTL.
    pub fn invalidate(&mut self, key: &QueryKey) -> Notifications {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.invalidated = true;
            debug!(key = %key, "Cache entry invalidated");
        }
        self.subscribers_for(key)
    }

    /// Start a fetch for this key: transition to Loading (existing data is
    /// kept) and return the generation the response must present to settle.
    pub(crate) fn begin_fetch(&mut self, key: &QueryKey, ttl: Duration) -> u64 {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(ttl));
        entry.generation += 1;
        entry.in_flight = Some(entry.generation);
        entry.status = EntryStatus::Loading;
        entry.generation
    }

    /// Whether a fetch is outstanding for this key.
    pub(crate) fn has_in_flight(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .map(|e| e.in_flight.is_some())
            .unwrap_or(false)
    }

    /// Whether a response carrying `generation` is still the one this entry
    /// is waiting for. False means a newer fetch superseded it and the
    /// response must be dropped.
    pub(crate) fn accepts_generation(&self, key: &QueryKey, generation: u64) -> bool {
        self.entries
            .get(key)
            .map(|e| e.generation == generation)
            .unwrap_or(false)
    }

    pub(crate) fn subscribers_for(&self, key: &QueryKey) -> Notifications {
        self.subscribers
            .get(key)
            .map(|subs| subs.iter().map(|(_, cb)| Arc::clone(cb)).collect())
            .unwrap_or_default()
    }

    pub(crate) fn add_subscriber(&mut self, key: &QueryKey, callback: Arc<SubscriberFn>) -> u64 {
        self.next_subscriber_id += 1;
        let id = self.next_subscriber_id;
        self.subscribers
            .entry(key.clone())
            .or_default()
            .push((id, callback));
        id
    }

    /// Remove a subscriber; returns how many remain on the key.
    pub(crate) fn remove_subscriber(&mut self, key: &QueryKey, id: u64) -> usize {
        if let Some(subs) = self.subscribers.get_mut(key) {
            subs.retain(|(sub_id, _)| *sub_id != id);
            let remaining = subs.len();
            if remaining == 0 {
                self.subscribers.remove(key);
            }
            remaining
        } else {
            0
        }
    }

    pub(crate) fn subscriber_count(&self, key: &QueryKey) -> usize {
        self.subscribers.get(key).map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
