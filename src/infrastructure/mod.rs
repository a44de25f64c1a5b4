//! Infrastructure layer for external integrations.
//!
//! Implements the repository traits defined by the domain layer and the
//! profile cache.
//!
//! # Modules
//!
//! - [`cache`] - Profile caching (Redis and no-op implementations)
//! - [`memory`] - In-process store
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod memory;
pub mod persistence;
