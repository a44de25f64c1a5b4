//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink, RankBatch, RankWrite};
use crate::error::AppError;
use async_trait::async_trait;

/// Remote data service contract for a business's links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Lists a business's links sorted by rank ascending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_business(&self, business_id: i64) -> Result<Vec<Link>, AppError>;

    /// Creates a link and returns it with its assigned id and `clicks = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Deletes a link owned by `business_id`.
    ///
    /// Returns `Ok(false)` if no such link exists. Surviving ranks are not
    /// renumbered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64, business_id: i64) -> Result<bool, AppError>;

    /// Applies a rank batch if its version is newer than the last applied one.
    ///
    /// Ids in the batch that no longer exist are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. No partial-failure
    /// detail is exposed.
    async fn apply_ranks(&self, batch: &RankBatch) -> Result<RankWrite, AppError>;

    /// Version of the last rank batch applied for a business.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn rank_version(&self, business_id: i64) -> Result<i64, AppError>;

    /// Increments a link's click counter.
    ///
    /// Returns `Ok(false)` if the link does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, id: i64) -> Result<bool, AppError>;
}
