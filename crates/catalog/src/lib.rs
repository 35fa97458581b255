//! # Catalog Crate
//!
//! Client for the external content catalog: title details, credits,
//! genre taxonomy, and the trending/popular/top-rated/discover listings.
//!
//! ## Main Components
//!
//! - **types**: wire types (`ContentSummary`, `ContentDetails`, `Credits`, ...)
//! - **client**: the `Catalog` trait and the `CatalogClient` implementation
//! - **cache**: TTL response cache (`MemoryCache`, `RedisCache`)
//! - **error**: `CatalogError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogClient, ContentType, MemoryCache, TimeWindow};
//! use std::sync::Arc;
//!
//! let client = CatalogClient::new(
//!     "https://catalog.example.com/3",
//!     api_token,
//!     Arc::new(MemoryCache::new()),
//! );
//!
//! let trending = client.trending(ContentType::Movie, TimeWindow::Week).await?;
//! println!("{} trending movies", trending.results.len());
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use cache::{cache_key, MemoryCache, RedisCache, ResponseCache, NEAR_STATIC_TTL, VOLATILE_TTL};
pub use client::{Catalog, CatalogClient};
pub use error::{CatalogError, Result};
pub use types::{
    CastMember, ContentDetails, ContentSummary, ContentType, CrewMember, Credits, DiscoverFilters,
    EpisodeSummary, GenreId, GenreTag, Page, SeasonDetails, SortBy, TimeWindow,
};
