use crate::config::Config;
use analytics::AnalyticsAggregator;
use catalog::{Catalog, CatalogClient, MemoryCache, RedisCache, ResponseCache};
use engagement::MemoryStore;
use recommender::RecommendationEngine;
use std::sync::Arc;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub engine: Arc<RecommendationEngine<MemoryStore>>,
    pub aggregator: Arc<AnalyticsAggregator<MemoryStore>>,
}

impl AppState {
    /// Assemble state around an arbitrary catalog implementation.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            engine: Arc::new(RecommendationEngine::new(catalog, store.clone())),
            aggregator: Arc::new(AnalyticsAggregator::new(store.clone())),
            store,
        }
    }

    /// Wire the full stack from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache: Arc<dyn ResponseCache> = match &config.redis_url {
            Some(url) => {
                info!("using redis response cache");
                Arc::new(RedisCache::connect(url)?)
            }
            None => {
                info!("no redis_url configured, using in-process response cache");
                Arc::new(MemoryCache::new())
            }
        };

        let catalog = CatalogClient::new(
            config.catalog_base_url.clone(),
            config.catalog_api_token.clone(),
            cache,
        );

        Ok(Self::new(Arc::new(catalog)))
    }
}
