//! Handlers for the owner's profile settings.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::profile::{ProfileResponse, UpdateProfileRequest};
use crate::domain::session::SessionContext;
use crate::error::AppError;
use crate::state::AppState;

/// # Endpoint
///
/// `GET /api/profile`
pub async fn get_profile_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<ProfileResponse>, AppError> {
    let business = state.profile_service.business(session.business_id).await?;
    Ok(Json(business.into()))
}

/// Saves a partial settings update.
///
/// # Endpoint
///
/// `PATCH /api/profile`
///
/// Every field is validated before anything is written; the first invalid
/// field is reported with its name in `details.field`.
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    payload.validate()?;

    let business = state
        .profile_service
        .update_settings(session.business_id, payload.into())
        .await?;

    Ok(Json(business.into()))
}
