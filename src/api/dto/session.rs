//! DTOs for sign-in and sign-out.

use serde::Serialize;

use crate::api::dto::links::BoardResponse;
use crate::domain::session::{SessionContext, View};

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub business_id: i64,
    pub slug: String,
    pub accent_color: String,
}

impl From<SessionContext> for SessionInfo {
    fn from(ctx: SessionContext) -> Self {
        Self {
            business_id: ctx.business_id,
            slug: ctx.slug,
            accent_color: ctx.accent_color,
        }
    }
}

/// Response for `POST /api/session` and `DELETE /api/session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub view: View,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardResponse>,
}
