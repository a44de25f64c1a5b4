//! Caching layer for public profile pages.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Redis-backed cache
//! - [`NullCache`] - No-op implementation when Redis is not configured

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
#[cfg(test)]
pub use service::MockCacheService;
pub use service::{CacheError, CacheResult, CacheService};
