//! Repository trait definitions for the domain layer.
//!
//! These traits are the contract of the remote data service. Concrete
//! implementations live in `crate::infrastructure`; mocks are generated with
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Ordered links, rank batches, click counters
//! - [`BusinessRepository`] - Business profiles and slugs
//! - [`TokenRepository`] - Bearer tokens acting for a business

pub mod business_repository;
pub mod link_repository;
pub mod token_repository;

pub use business_repository::BusinessRepository;
pub use link_repository::LinkRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use business_repository::MockBusinessRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
