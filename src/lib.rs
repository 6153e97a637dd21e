//! matchday - client-side data layer for a match ticket price dashboard.
//!
//! Sits between a presentation layer and a remote read-only API exposing
//! matches, stadiums, teams, tickets, and computed deal analytics. The crate
//! owns freshness decisions, fetch deduplication, scheduled revalidation of
//! live data, and the derived views (lookups, rankings, filter sets) the
//! dashboard renders.
//!
//! Typical wiring:
//!
//! ```no_run
//! use std::sync::Arc;
//! use matchday::{ApiClient, CachePolicy, Config, DataCache, QueryKey};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::from_env();
//! let policy = CachePolicy::default();
//! let client = ApiClient::new(&config, policy.request_timeout)?;
//! let cache = DataCache::new(Arc::new(client), policy);
//!
//! let snapshot = cache.resolve(&QueryKey::UpcomingMatches);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod views;

pub use api::{ApiClient, ApiError, ResourceFetcher};
pub use cache::{DataCache, EntryStatus, QueryKey, Snapshot, Subscription, Volatility};
pub use config::{CachePolicy, Config};

use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// For embedding binaries; use `RUST_LOG` to control the level
/// (e.g. `RUST_LOG=matchday=debug`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}
