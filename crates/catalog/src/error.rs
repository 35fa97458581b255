//! Error types for catalog lookups.

use thiserror::Error;

/// Errors surfaced by the catalog client.
///
/// Callers that can degrade gracefully (the recommendation engine, the
/// analytics aggregator) catch these per sub-step; the HTTP layer maps
/// them to a 502.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The request never completed (connect, timeout, body read).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The catalog answered with a non-success status. No retry is
    /// attempted; the status propagates as-is.
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    /// The response body did not match the expected shape.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for catalog results.
pub type Result<T> = std::result::Result<T, CatalogError>;
