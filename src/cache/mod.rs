//! Resource cache: keyed entries, fetch coordination, and scheduled
//! revalidation.
//!
//! The pieces:
//!
//! - `key`: structural query keys and per-class TTL policy
//! - `store`: cache entries, freshness state, subscriber registry
//! - `coordinator`: fetch dedup, retry, generation-guarded settlement
//! - `scheduler`: interval timers for subscribed volatile keys
//! - `manager`: the `DataCache` facade tying it all together

pub mod coordinator;
pub mod key;
pub mod manager;
pub mod scheduler;
pub mod store;

pub use key::{QueryKey, Volatility};
pub use manager::{DataCache, Subscription};
pub use store::{EntryStatus, Snapshot};
