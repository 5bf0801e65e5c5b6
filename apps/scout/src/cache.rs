//! Description cache — best-effort, cache-aside. Redis is the backing store;
//! the resolver depends only on the `DescriptionCache` trait so tests run
//! against an in-memory map.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

use crate::errors::CacheError;
use crate::models::Description;

/// Key derived deterministically from the listing id. Injective: two distinct
/// ids never collide.
pub fn description_key(listing_id: &str) -> String {
    format!("scout:description:{listing_id}")
}

/// Get/set capability over cached descriptions. A miss is `Ok(None)`; an
/// `Err` is an access failure, which callers treat as a miss.
#[async_trait]
pub trait DescriptionCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Description>, CacheError>;
    async fn set(
        &self,
        key: &str,
        description: &Description,
        ttl: Duration,
    ) -> Result<(), CacheError>;
}

/// Redis-backed cache. Concurrent resolvers may race to write the same key;
/// last-writer-wins is fine because the cached content is immutable per id.
#[derive(Clone)]
pub struct RedisCache {
    conn: MultiplexedConnection,
}

impl RedisCache {
    /// Connects and verifies the server with a PING so an unreachable cache
    /// surfaces before any pipeline work is scheduled.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<_, ()>(&mut conn).await?;
        info!("Redis cache connection established");
        Ok(Self { conn })
    }
}

#[async_trait]
impl DescriptionCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Description>, CacheError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(key).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        description: &Description,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(description)?;
        conn.set_ex::<_, _, ()>(key, json, ttl.as_secs()).await?;
        Ok(())
    }
}
