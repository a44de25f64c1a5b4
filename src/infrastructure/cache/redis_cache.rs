//! Redis-backed profile cache.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

const KEY_PREFIX: &str = "profile:";

/// Redis cache for public profile JSON.
///
/// Shares one `ConnectionManager` across requests. Command errors are logged
/// and swallowed.
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: u64,
}

impl RedisCache {
    /// Connects to Redis and verifies the connection with a PING.
    ///
    /// `default_ttl_seconds` comes from `CACHE_TTL_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut probe = manager.clone();
        probe
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            conn: manager,
            default_ttl: default_ttl_seconds,
        })
    }

    fn key(slug: &str) -> String {
        format!("{}{}", KEY_PREFIX, slug.to_ascii_lowercase())
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_profile(&self, slug: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(Self::key(slug)).await {
            Ok(hit) => {
                debug!(slug, hit = hit.is_some(), "Profile cache lookup");
                Ok(hit)
            }
            Err(e) => {
                warn!(slug, error = %e, "Redis GET failed");
                Ok(None)
            }
        }
    }

    async fn set_profile(
        &self,
        slug: &str,
        profile_json: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        if let Err(e) = conn
            .set_ex::<_, _, ()>(Self::key(slug), profile_json, ttl)
            .await
        {
            warn!(slug, error = %e, "Redis SET failed");
        } else {
            debug!(slug, ttl, "Profile cached");
        }
        Ok(())
    }

    async fn invalidate(&self, slug: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();

        match conn.del::<_, i32>(Self::key(slug)).await {
            Ok(deleted) if deleted > 0 => debug!(slug, "Profile cache invalidated"),
            Ok(_) => {}
            Err(e) => warn!(slug, error = %e, "Redis DEL failed"),
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
