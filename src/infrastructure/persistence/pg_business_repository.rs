//! PostgreSQL implementation of business repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Business, NewBusiness};
use crate::domain::repositories::BusinessRepository;
use crate::domain::settings::ProfileSettings;
use crate::error::AppError;

const BUSINESS_COLUMNS: &str = "id, owner, slug, name, description, phone, address, hours, \
                                theme_color, rank_version, created_at";

/// PostgreSQL repository for business profiles.
///
/// Slug uniqueness is enforced by a unique index on `LOWER(slug)`.
pub struct PgBusinessRepository {
    pool: Arc<PgPool>,
}

impl PgBusinessRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for PgBusinessRepository {
    async fn create(&self, new_business: NewBusiness) -> Result<Business, AppError> {
        let business = sqlx::query_as::<_, Business>(&format!(
            r#"
            INSERT INTO businesses (owner, slug, name, theme_color)
            VALUES ($1, LOWER($2), $3, $4)
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(new_business.owner)
        .bind(new_business.slug)
        .bind(new_business.name)
        .bind(new_business.theme_color)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(business)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Business>, AppError> {
        let business = sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(business)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, AppError> {
        let business = sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses WHERE LOWER(slug) = LOWER($1)"
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(business)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM businesses WHERE LOWER(slug) = LOWER($1))",
        )
        .bind(slug)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn update_settings(
        &self,
        id: i64,
        settings: ProfileSettings,
    ) -> Result<Business, AppError> {
        let business = sqlx::query_as::<_, Business>(&format!(
            r#"
            UPDATE businesses
            SET name = $2,
                description = $3,
                phone = $4,
                address = $5,
                hours = $6,
                theme_color = $7
            WHERE id = $1
            RETURNING {BUSINESS_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(settings.name)
        .bind(settings.description)
        .bind(settings.phone)
        .bind(settings.address)
        .bind(settings.hours)
        .bind(settings.theme_color)
        .fetch_optional(self.pool.as_ref())
        .await?;

        business.ok_or_else(|| AppError::not_found("Business not found", json!({ "id": id })))
    }

    async fn list(&self) -> Result<Vec<Business>, AppError> {
        let businesses = sqlx::query_as::<_, Business>(&format!(
            "SELECT {BUSINESS_COLUMNS} FROM businesses ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(businesses)
    }
}
