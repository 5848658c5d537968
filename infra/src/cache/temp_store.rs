//! Redis implementation of the core `TemporaryStore` trait.
//!
//! Keys carry their TTL natively via `SET ... EX`; the paired consume runs
//! as one server-side script, giving the workflow its at-most-one-consumer
//! guarantee.

use async_trait::async_trait;

use onbo_core::services::verification::TemporaryStore;

use super::redis_client::RedisClient;

/// Redis-backed temporary store for staged sessions and drafts
#[derive(Clone)]
pub struct RedisTemporaryStore {
    /// Redis client for store operations
    redis_client: RedisClient,
}

impl RedisTemporaryStore {
    /// Create a new Redis temporary store
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }
}

#[async_trait]
impl TemporaryStore for RedisTemporaryStore {
    async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), String> {
        self.redis_client
            .set_with_expiry(key, value, ttl_seconds)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.redis_client.get(key).await.map_err(|e| e.to_string())
    }

    async fn get_del(&self, key: &str) -> Result<Option<String>, String> {
        self.redis_client
            .get_del(key)
            .await
            .map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.redis_client
            .delete(key)
            .await
            .map_err(|e| e.to_string())
    }

    async fn take_pair(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Option<(String, String)>, String> {
        self.redis_client
            .take_pair(first, second)
            .await
            .map_err(|e| e.to_string())
    }
}
