//! Transport layer for the ticket comparison gateway.
//!
//! `ApiClient` performs the actual HTTP reads; `ResourceFetcher` is the
//! seam the cache layer consumes, so tests can swap the network out.
//! Failures are classified into the four-way `ApiError` taxonomy that
//! drives the cache's retry decisions.

pub mod client;
pub mod error;
pub mod fetcher;

pub use client::ApiClient;
pub use error::ApiError;
pub use fetcher::ResourceFetcher;
