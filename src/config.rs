//! Cache policy and client configuration.
//!
//! TTLs are per resource class: live match state changes minute to minute,
//! deal analytics refresh on the backend every few minutes, and the team /
//! stadium / provider catalogs barely move during a session. Each constant
//! below is a startup default; construct a [`CachePolicy`] with different
//! values to override.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// TTL for live match state. Matches the revalidation interval so a
/// subscribed live view never serves data older than one refresh cycle.
const LIVE_TTL_SECS: u64 = 60;

/// TTL for match schedules, rosters, and single-match detail.
const MATCH_TTL_SECS: u64 = 30 * 60;

/// TTL for deal summaries, price history, and market analytics.
const DEAL_TTL_SECS: u64 = 15 * 60;

/// TTL for near-static catalogs: teams, stadiums, ticket providers.
const CATALOG_TTL_SECS: u64 = 60 * 60;

/// Fixed wall-clock interval between background refreshes of a subscribed
/// volatile key.
const REVALIDATE_INTERVAL_SECS: u64 = 60;

/// Automatic retries per resolve. One extra attempt covers a backend that is
/// still warming up without hammering one that is genuinely down.
const RETRY_BUDGET: u32 = 1;

/// HTTP request timeout. A timed-out request counts as a fetch failure and
/// feeds the retry policy.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default API gateway base URL (all resource services sit behind it).
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Freshness and retry policy for the cache layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachePolicy {
    pub live_ttl: Duration,
    pub match_ttl: Duration,
    pub deal_ttl: Duration,
    pub catalog_ttl: Duration,
    pub revalidate_interval: Duration,
    pub retry_budget: u32,
    pub request_timeout: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            live_ttl: Duration::from_secs(LIVE_TTL_SECS),
            match_ttl: Duration::from_secs(MATCH_TTL_SECS),
            deal_ttl: Duration::from_secs(DEAL_TTL_SECS),
            catalog_ttl: Duration::from_secs(CATALOG_TTL_SECS),
            revalidate_interval: Duration::from_secs(REVALIDATE_INTERVAL_SECS),
            retry_budget: RETRY_BUDGET,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Client connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub auth_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_token: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Reads `MATCHDAY_API_BASE_URL` and `MATCHDAY_AUTH_TOKEN`; a `.env`
    /// file is honored if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            api_base_url: std::env::var("MATCHDAY_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            auth_token: std::env::var("MATCHDAY_AUTH_TOKEN").ok(),
        }
    }
}
