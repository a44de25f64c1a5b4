//! DTOs for click tracking.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/clicks`.
#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub link_id: i64,
}

/// `queued` is `false` when the click queue was full and the event dropped.
#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub queued: bool,
}
