//! Link entity: one entry in a business's ordered link list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link owned by a business profile.
///
/// `rank` is the zero-based display position among the business's links.
/// `clicks` is only ever incremented by the click worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub business_id: i64,
    pub title: String,
    pub url: String,
    #[sqlx(rename = "position")]
    pub rank: i32,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        business_id: i64,
        title: String,
        url: String,
        rank: i32,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            business_id,
            title,
            url,
            rank,
            clicks,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub business_id: i64,
    pub title: String,
    pub url: String,
    pub rank: i32,
}

/// Rank assignment for a single link inside a [`RankBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankAssignment {
    pub id: i64,
    pub rank: i32,
}

/// A batch of rank assignments covering a business's whole link sequence.
///
/// `version` is monotonic per business. Stores apply a batch only when its
/// version is newer than the last applied one.
///
/// `previous` holds the order before the move and is used to restore it when
/// rollback on failure is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankBatch {
    pub business_id: i64,
    pub version: i64,
    pub ranks: Vec<RankAssignment>,
    pub previous: Vec<Link>,
}

/// Outcome of applying a [`RankBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankWrite {
    Applied,
    /// A newer batch was already applied; this one was discarded.
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            7,
            "Menu".to_string(),
            "https://example.com/menu".to_string(),
            0,
            0,
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.business_id, 7);
        assert_eq!(link.title, "Menu");
        assert_eq!(link.rank, 0);
        assert_eq!(link.clicks, 0);
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_link_serializes_rank() {
        let link = Link::new(
            3,
            1,
            "Book".to_string(),
            "https://example.com/book".to_string(),
            2,
            5,
            Utc::now(),
        );

        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["rank"], 2);
        assert_eq!(value["clicks"], 5);
    }
}
