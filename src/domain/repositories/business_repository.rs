//! Repository trait for business profiles.

use crate::domain::entities::{Business, NewBusiness};
use crate::domain::settings::ProfileSettings;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for business profiles.
///
/// Slugs are stored lowercase and compared case-insensitively.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BusinessRepository: Send + Sync {
    /// Creates a business profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_business: NewBusiness) -> Result<Business, AppError>;

    /// Finds a business by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Business>, AppError>;

    /// Finds a business by slug, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, AppError>;

    /// Checks whether a slug is taken, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError>;

    /// Replaces the display and contact fields of a business.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the business does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_settings(
        &self,
        id: i64,
        settings: ProfileSettings,
    ) -> Result<Business, AppError>;

    /// Lists all businesses, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Business>, AppError>;
}
