//! TTL response cache for catalog lookups.
//!
//! Every catalog request is keyed by `(endpoint, sorted params)` hashed
//! into an opaque key. Two tiers apply: volatile listings expire after an
//! hour, near-static data (credits, genre taxonomy) after a day. There is
//! no eviction beyond TTL expiry and no manual invalidation.
//!
//! The trait is deliberately infallible: a broken cache must never fail a
//! catalog request, so implementations log their own errors and report a
//! miss instead.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::warn;

/// TTL for volatile data: trending, popular, search, details, discovery.
pub const VOLATILE_TTL: Duration = Duration::from_secs(3600);

/// TTL for near-static data: credits and the genre taxonomy.
pub const NEAR_STATIC_TTL: Duration = Duration::from_secs(86_400);

/// Key-value store with TTL semantics for cached catalog responses.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// Look up a cached response. Expired or unreadable entries are misses.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store a response under `key` for `ttl`.
    async fn put(&self, key: &str, value: &Value, ttl: Duration);
}

/// Build the cache key for a request: the endpoint plus its parameters
/// sorted by name, hashed so the key stays opaque and fixed-width.
pub fn cache_key(endpoint: &str, params: &[(String, String)]) -> String {
    let mut sorted = params.to_vec();
    sorted.sort();

    let mut raw = endpoint.to_string();
    if !sorted.is_empty() {
        raw.push('?');
        for (i, (name, value)) in sorted.iter().enumerate() {
            if i > 0 {
                raw.push('&');
            }
            raw.push_str(name);
            raw.push('=');
            raw.push_str(value);
        }
    }

    format!("catalog:{:x}", md5::compute(raw.as_bytes()))
}

/// In-process cache used in tests and single-node setups.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (Instant, Value)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some((deadline, value)) if *deadline > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn put(&self, key: &str, value: &Value, ttl: Duration) {
        let deadline = Instant::now() + ttl;
        self.entries
            .write()
            .await
            .insert(key.to_string(), (deadline, value.clone()));
    }
}

/// Redis-backed cache. Values are stored as JSON strings with `SET .. EX`.
pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    pub fn connect(redis_url: &str) -> std::result::Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResponseCache for RedisCache {
    async fn get(&self, key: &str) -> Option<Value> {
        use redis::AsyncCommands;

        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(err) => {
                warn!(error = %err, "redis unavailable, treating as cache miss");
                return None;
            }
        };

        let cached: Option<String> = match conn.get(key).await {
            Ok(cached) => cached,
            Err(err) => {
                warn!(error = %err, key, "redis read failed, treating as cache miss");
                return None;
            }
        };

        cached.and_then(|json| serde_json::from_str(&json).ok())
    }

    async fn put(&self, key: &str, value: &Value, ttl: Duration) {
        use redis::AsyncCommands;

        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to serialize cache payload");
                return;
            }
        };

        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(err) => {
                warn!(error = %err, "redis unavailable, dropping cache write");
                return;
            }
        };

        if let Err(err) = conn
            .set_ex::<_, _, ()>(key, payload, ttl.as_secs())
            .await
        {
            warn!(error = %err, key, "redis write failed");
        }
    }
}
