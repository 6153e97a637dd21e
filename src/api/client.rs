//! HTTP client for the ticket comparison API gateway.
//!
//! All resource services (matches, stadiums, tickets, deals) sit behind one
//! gateway; the client turns a [`QueryKey`] into a GET against it and hands
//! back the raw JSON payload. Freshness, retry, and dedup live in the cache
//! layer, not here — this is a thin transport.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::cache::QueryKey;
use crate::config::Config;

use super::{ApiError, ResourceFetcher};

/// API client for the dashboard gateway.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client with the given request timeout.
    pub fn new(config: &Config, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.auth_token.clone(),
        })
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET");

        let mut request = self.client.get(&url);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        response.json().await.map_err(ApiError::from_transport)
    }
}

#[async_trait]
impl ResourceFetcher for ApiClient {
    async fn fetch(&self, key: &QueryKey) -> Result<Value, ApiError> {
        self.get_json(&key.endpoint()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let config = Config {
            api_base_url: "http://localhost:8080/".to_string(),
            auth_token: None,
        };
        let client = ApiClient::new(&config, Duration::from_secs(10)).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_with_token_sets_credential() {
        let client = ApiClient::new(&Config::default(), Duration::from_secs(10)).unwrap();
        assert!(client.token.is_none());
        let authed = client.with_token("abc123".to_string());
        assert_eq!(authed.token.as_deref(), Some("abc123"));
    }
}
