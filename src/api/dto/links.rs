//! DTOs for the link board endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::BoardSnapshot;
use crate::domain::entities::Link;

/// Request body for `POST /api/links`.
///
/// Title and URL are checked by the board in a fixed order, so no derive
/// validation runs here.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Request body for `POST /api/links/reorder`.
///
/// `source_id` is the dragged link, `target_id` the link it was dropped on.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub source_id: i64,
    pub target_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub rank: i32,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
            rank: link.rank,
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}

/// The board as the dashboard sees it.
///
/// `synced` is `false` while remote calls issued from the board are pending.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub business_id: i64,
    pub version: i64,
    pub synced: bool,
    pub links: Vec<LinkResponse>,
}

impl From<BoardSnapshot> for BoardResponse {
    fn from(snapshot: BoardSnapshot) -> Self {
        Self {
            business_id: snapshot.business_id,
            version: snapshot.version,
            synced: snapshot.synced,
            links: snapshot.links.into_iter().map(LinkResponse::from).collect(),
        }
    }
}
