//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, RankBatch, RankWrite};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, business_id, title, url, position, clicks, created_at";

/// PostgreSQL repository for a business's ordered links.
///
/// Rank batches are gated on `businesses.rank_version` inside a single
/// transaction, so a batch older than the last applied one never lands.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn list_by_business(&self, business_id: i64) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE business_id = $1 ORDER BY position, id"
        ))
        .bind(business_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            r#"
            INSERT INTO links (business_id, title, url, position)
            VALUES ($1, $2, $3, $4)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(new_link.business_id)
        .bind(new_link.title)
        .bind(new_link.url)
        .bind(new_link.rank)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn delete(&self, id: i64, business_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND business_id = $2")
            .bind(id)
            .bind(business_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn apply_ranks(&self, batch: &RankBatch) -> Result<RankWrite, AppError> {
        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query(
            r#"
            UPDATE businesses
            SET rank_version = $2
            WHERE id = $1 AND rank_version < $2
            "#,
        )
        .bind(batch.business_id)
        .bind(batch.version)
        .execute(&mut *tx)
        .await?;

        if claimed.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM businesses WHERE id = $1)")
                    .bind(batch.business_id)
                    .fetch_one(&mut *tx)
                    .await?;
            tx.rollback().await?;

            if !exists {
                return Err(AppError::not_found(
                    "Business not found",
                    json!({ "business_id": batch.business_id }),
                ));
            }
            return Ok(RankWrite::Stale);
        }

        let (ids, ranks): (Vec<i64>, Vec<i32>) =
            batch.ranks.iter().map(|a| (a.id, a.rank)).unzip();

        sqlx::query(
            r#"
            UPDATE links AS l
            SET position = v.position
            FROM UNNEST($1::bigint[], $2::int[]) AS v(id, position)
            WHERE l.id = v.id AND l.business_id = $3
            "#,
        )
        .bind(&ids)
        .bind(&ranks)
        .bind(batch.business_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(RankWrite::Applied)
    }

    async fn rank_version(&self, business_id: i64) -> Result<i64, AppError> {
        let version: Option<i64> =
            sqlx::query_scalar("SELECT rank_version FROM businesses WHERE id = $1")
                .bind(business_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(version.unwrap_or(0))
    }

    async fn record_click(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE links SET clicks = clicks + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
