//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow`.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Ordered links, version-gated rank batches, clicks
//! - [`PgBusinessRepository`] - Business profiles and slugs
//! - [`PgTokenRepository`] - Bearer token storage and lookup

pub mod pg_business_repository;
pub mod pg_link_repository;
pub mod pg_token_repository;

pub use pg_business_repository::PgBusinessRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_token_repository::PgTokenRepository;
