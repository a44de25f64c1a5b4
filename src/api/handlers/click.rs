//! Handler for fire-and-forget click tracking.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::click::{ClickRequest, ClickResponse};
use crate::state::AppState;

/// Queues a click on a link.
///
/// # Endpoint
///
/// `POST /api/clicks`
///
/// Always answers 202; the increment happens later on the click worker and
/// unknown ids are ignored there.
pub async fn click_handler(
    State(state): State<AppState>,
    Json(payload): Json<ClickRequest>,
) -> (StatusCode, Json<ClickResponse>) {
    let queued = state.track_click(payload.link_id);
    (StatusCode::ACCEPTED, Json(ClickResponse { queued }))
}
