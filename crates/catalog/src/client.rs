//! HTTP client for the external content catalog.
//!
//! Every call goes through `request()`: compute the cache key, try the
//! cache, otherwise issue one GET and store the response under the tier's
//! TTL. A non-success status propagates as `CatalogError::Status` with no
//! retry; the caller decides whether to degrade.

use crate::cache::{cache_key, ResponseCache, NEAR_STATIC_TTL, VOLATILE_TTL};
use crate::error::{CatalogError, Result};
use crate::types::{
    ContentDetails, ContentSummary, ContentType, Credits, DiscoverFilters, GenreTag, Page,
    SeasonDetails, TimeWindow,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Read contract for the content catalog.
///
/// `CatalogClient` is the production implementation; tests hand the
/// recommendation engine stub implementations with canned listings.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search(
        &self,
        query: &str,
        content_type: ContentType,
        page: u32,
    ) -> Result<Page<ContentSummary>>;

    async fn details(&self, content_id: u64, content_type: ContentType) -> Result<ContentDetails>;

    async fn credits(&self, content_id: u64, content_type: ContentType) -> Result<Credits>;

    async fn trending(
        &self,
        content_type: ContentType,
        window: TimeWindow,
    ) -> Result<Page<ContentSummary>>;

    async fn popular(&self, content_type: ContentType, page: u32) -> Result<Page<ContentSummary>>;

    async fn top_rated(&self, content_type: ContentType, page: u32)
        -> Result<Page<ContentSummary>>;

    async fn genres(&self, content_type: ContentType) -> Result<Vec<GenreTag>>;

    async fn season_details(&self, show_id: u64, season_number: u32) -> Result<SeasonDetails>;

    async fn discover(
        &self,
        content_type: ContentType,
        filters: &DiscoverFilters,
    ) -> Result<Page<ContentSummary>>;
}

/// Catalog client with a TTL response cache in front of the network.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    bearer_token: String,
    cache: Arc<dyn ResponseCache>,
}

#[derive(Deserialize)]
struct GenreListResponse {
    #[serde(default)]
    genres: Vec<GenreTag>,
}

impl CatalogClient {
    /// Create a client. The bearer token comes from configuration; it is
    /// never logged.
    pub fn new(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
        cache: Arc<dyn ResponseCache>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
            cache,
        }
    }

    /// Cached GET against the catalog. Cache first, then one network call.
    async fn request(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        ttl: Duration,
    ) -> Result<Value> {
        let key = cache_key(endpoint, params);

        if let Some(hit) = self.cache.get(&key).await {
            debug!(endpoint, "catalog cache hit");
            return Ok(hit);
        }

        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(params)
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|source| CatalogError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        self.cache.put(&key, &value, ttl).await;
        debug!(endpoint, "catalog cache fill");
        Ok(value)
    }

    fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T> {
        serde_json::from_value(value).map_err(|source| CatalogError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn get_as<T: DeserializeOwned>(
        &self,
        endpoint: String,
        params: Vec<(String, String)>,
        ttl: Duration,
    ) -> Result<T> {
        let value = self.request(&endpoint, &params, ttl).await?;
        Self::decode(&endpoint, value)
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn search(
        &self,
        query: &str,
        content_type: ContentType,
        page: u32,
    ) -> Result<Page<ContentSummary>> {
        self.get_as(
            format!("search/{content_type}"),
            vec![
                ("query".to_string(), query.to_string()),
                ("page".to_string(), page.to_string()),
            ],
            VOLATILE_TTL,
        )
        .await
    }

    async fn details(&self, content_id: u64, content_type: ContentType) -> Result<ContentDetails> {
        self.get_as(
            format!("{content_type}/{content_id}"),
            Vec::new(),
            VOLATILE_TTL,
        )
        .await
    }

    async fn credits(&self, content_id: u64, content_type: ContentType) -> Result<Credits> {
        // Credits rarely change; they sit in the near-static tier.
        self.get_as(
            format!("{content_type}/{content_id}/credits"),
            Vec::new(),
            NEAR_STATIC_TTL,
        )
        .await
    }

    async fn trending(
        &self,
        content_type: ContentType,
        window: TimeWindow,
    ) -> Result<Page<ContentSummary>> {
        self.get_as(
            format!("trending/{content_type}/{}", window.as_str()),
            Vec::new(),
            VOLATILE_TTL,
        )
        .await
    }

    async fn popular(&self, content_type: ContentType, page: u32) -> Result<Page<ContentSummary>> {
        self.get_as(
            format!("{content_type}/popular"),
            vec![("page".to_string(), page.to_string())],
            VOLATILE_TTL,
        )
        .await
    }

    async fn top_rated(
        &self,
        content_type: ContentType,
        page: u32,
    ) -> Result<Page<ContentSummary>> {
        self.get_as(
            format!("{content_type}/top_rated"),
            vec![("page".to_string(), page.to_string())],
            VOLATILE_TTL,
        )
        .await
    }

    async fn genres(&self, content_type: ContentType) -> Result<Vec<GenreTag>> {
        let listing: GenreListResponse = self
            .get_as(
                format!("genre/{content_type}/list"),
                Vec::new(),
                NEAR_STATIC_TTL,
            )
            .await?;
        Ok(listing.genres)
    }

    async fn season_details(&self, show_id: u64, season_number: u32) -> Result<SeasonDetails> {
        self.get_as(
            format!("tv/{show_id}/season/{season_number}"),
            Vec::new(),
            VOLATILE_TTL,
        )
        .await
    }

    async fn discover(
        &self,
        content_type: ContentType,
        filters: &DiscoverFilters,
    ) -> Result<Page<ContentSummary>> {
        let mut params = vec![
            ("sort_by".to_string(), filters.sort_by.as_str().to_string()),
            ("page".to_string(), filters.page.max(1).to_string()),
        ];
        if let Some(genre) = filters.with_genre {
            params.push(("with_genres".to_string(), genre.to_string()));
        }

        self.get_as(format!("discover/{content_type}"), params, VOLATILE_TTL)
            .await
    }
}
