use async_trait::async_trait;
use serde_json::Value;

use crate::cache::QueryKey;

use super::ApiError;

/// Transport seam between the query coordinator and the network.
///
/// The coordinator never builds requests itself; it hands a [`QueryKey`] to
/// whatever implements this trait and caches the opaque JSON payload that
/// comes back. Tests substitute a scripted fetcher here.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, key: &QueryKey) -> Result<Value, ApiError>;
}
