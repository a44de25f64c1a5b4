//! Handlers for the link board (list, append, remove, reorder).

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::links::{BoardResponse, CreateLinkRequest, LinkResponse, ReorderRequest};
use crate::domain::session::SessionContext;
use crate::error::AppError;
use crate::state::AppState;

/// Current local sequence of the signed-in business.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<BoardResponse>, AppError> {
    let snapshot = state.board_service.snapshot(session.business_id).await?;
    Ok(Json(snapshot.into()))
}

/// Appends a link once the store has created it.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Errors
///
/// - 400 "Title is required", "URL is required" or
///   "Invalid URL. Must be a valid http/https link."
/// - 500 if the store rejects the create
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let link = state
        .board_service
        .append(session.business_id, &payload.title, &payload.url)
        .await?;
    state.profile_service.invalidate(&session.slug).await;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Removes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let removed = state.board_service.remove(session.business_id, id).await;
    if !matches!(removed, Err(AppError::NotFound { .. })) {
        state.profile_service.invalidate(&session.slug).await;
    }
    removed?;

    Ok(StatusCode::NO_CONTENT)
}

/// Moves the dragged link onto the slot of the link it was dropped on.
///
/// # Endpoint
///
/// `POST /api/links/reorder`
///
/// # Request Body
///
/// ```json
/// { "source_id": 3, "target_id": 1 }
/// ```
///
/// Equal or unknown ids leave the board unchanged and still answer 200.
pub async fn reorder_links_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(payload): Json<ReorderRequest>,
) -> Result<Json<BoardResponse>, AppError> {
    let before = state.board_service.snapshot(session.business_id).await?.version;
    let reordered = state
        .board_service
        .reorder(session.business_id, payload.source_id, payload.target_id)
        .await;
    // A no-op reorder leaves the version (and the public profile) untouched.
    if !matches!(&reordered, Ok(snapshot) if snapshot.version == before) {
        state.profile_service.invalidate(&session.slug).await;
    }

    Ok(Json(reordered?.into()))
}
