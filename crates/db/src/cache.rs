//! Point-lookup caching for action records with Redis.
//!
//! The repositories follow a cache-aside discipline: existence-oriented
//! reads inside the create path consult Redis first and fall back to the
//! database on a miss; every write invalidates the shadowing entries rather
//! than writing through, so the uncached getters always observe committed
//! state.
//!
//! Two key spaces exist per action kind:
//!
//! - natural key: `{prefix}:{kind}:{target_id}:{target_type}:{user_id}`
//! - record key: `{prefix}:{kind}:rec:{target_id}:{record_id}`
//!
//! The record key is primed after an insert so point lookups by record id
//! are served from the cache.

use fred::clients::Client as RedisClient;
use fred::interfaces::KeysInterface;
use fred::types::Expiration;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default cache TTL: 1 hour.
const DEFAULT_CACHE_TTL_SECS: i64 = 60 * 60;

/// Redis-backed point-lookup cache for action records.
#[derive(Clone)]
pub struct ActionCache {
    redis: Arc<RedisClient>,
    prefix: String,
    ttl_secs: i64,
}

impl ActionCache {
    /// Create a new cache with the default TTL.
    #[must_use]
    pub fn new(redis: Arc<RedisClient>, prefix: impl Into<String>) -> Self {
        Self {
            redis,
            prefix: prefix.into(),
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }

    /// Create a new cache with a custom TTL.
    #[must_use]
    pub fn with_ttl(redis: Arc<RedisClient>, prefix: impl Into<String>, ttl: Duration) -> Self {
        Self {
            redis,
            prefix: prefix.into(),
            ttl_secs: ttl.as_secs() as i64,
        }
    }

    /// Cache key for a natural-key lookup.
    #[must_use]
    pub fn key_for(&self, kind: &str, target_id: &str, target_type: i32, user_id: &str) -> String {
        format!("{}:{kind}:{target_id}:{target_type}:{user_id}", self.prefix)
    }

    /// Cache key for a point lookup by record id.
    #[must_use]
    pub fn record_key_for(&self, kind: &str, target_id: &str, record_id: &str) -> String {
        format!("{}:{kind}:rec:{target_id}:{record_id}", self.prefix)
    }

    /// Get a cached record.
    ///
    /// Returns `Ok(Some(record))` if cached, `Ok(None)` if not cached.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let result: Option<String> = self
            .redis
            .get(key)
            .await
            .map_err(|e| CacheError::Redis(e.to_string()))?;

        if let Some(json_str) = result {
            let record: T = serde_json::from_str(&json_str)
                .map_err(|e| CacheError::Serialization(e.to_string()))?;

            debug!(key = %key, "Cache hit for action record");
            Ok(Some(record))
        } else {
            debug!(key = %key, "Cache miss for action record");
            Ok(None)
        }
    }

    /// Store a record in cache.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let json_str =
            serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))?;

        self.redis
            .set::<(), _, _>(
                key,
                json_str,
                Some(Expiration::EX(self.ttl_secs)),
                None,
                false,
            )
            .await
            .map_err(|e| CacheError::Redis(e.to_string()))?;

        debug!(key = %key, "Cached action record");

        Ok(())
    }

    /// Invalidate a cached record.
    pub async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        self.redis
            .del::<(), _>(key)
            .await
            .map_err(|e| CacheError::Redis(e.to_string()))?;

        debug!(key = %key, "Invalidated cached action record");

        Ok(())
    }
}

/// Action cache error type.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Redis operation failed.
    #[error("Redis error: {0}")]
    Redis(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cache() -> ActionCache {
        let client = RedisClient::new(fred::types::config::Config::default(), None, None, None);
        ActionCache::new(Arc::new(client), "action")
    }

    #[test]
    fn test_natural_key_generation() {
        let cache = test_cache();
        let key = cache.key_for("follow", "t1", 2, "u1");
        assert_eq!(key, "action:follow:t1:2:u1");
    }

    #[test]
    fn test_record_key_generation() {
        let cache = test_cache();
        let key = cache.record_key_for("share", "t1", "01h2xcejqtf2nbrexx3vqjhp41");
        assert_eq!(key, "action:share:rec:t1:01h2xcejqtf2nbrexx3vqjhp41");
    }
}
