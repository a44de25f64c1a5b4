//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache for serialized public profiles, keyed by lowercase slug.
///
/// Implementations are fail-open: backend errors are logged and reported as
/// misses so reads fall back to the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached profile JSON for a slug.
    ///
    /// `Ok(None)` on miss or backend error.
    async fn get_profile(&self, slug: &str) -> CacheResult<Option<String>>;

    /// Stores profile JSON for a slug. `ttl_seconds = None` uses the
    /// implementation default.
    async fn set_profile(
        &self,
        slug: &str,
        profile_json: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Drops the cached profile for a slug.
    ///
    /// Called after any write that changes what the public page shows.
    async fn invalidate(&self, slug: &str) -> CacheResult<()>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
