//! Handlers for the dashboard session lifecycle.

use axum::{Extension, Json, extract::State};

use crate::api::dto::session::SessionResponse;
use crate::domain::session::{SessionContext, View, ViewEvent};
use crate::error::AppError;
use crate::state::AppState;

/// Signs in: loads the business's board from the store.
///
/// # Endpoint
///
/// `POST /api/session`
pub async fn sign_in_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<SessionResponse>, AppError> {
    let board = state.board_service.open(session.business_id).await?;

    Ok(Json(SessionResponse {
        view: View::Login.on(ViewEvent::SignedIn, true),
        session: Some(session.into()),
        board: Some(board.into()),
    }))
}

/// Signs out: tears the board down and clears its local sequence.
///
/// The bearer token stays valid; revoke it with the admin CLI.
///
/// # Endpoint
///
/// `DELETE /api/session`
pub async fn sign_out_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Json<SessionResponse> {
    state.board_service.close(session.business_id).await;

    Json(SessionResponse {
        view: View::Dashboard.on(ViewEvent::SignedOut, false),
        session: None,
        board: None,
    })
}
