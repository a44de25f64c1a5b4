//! Unauthenticated read endpoints.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::profile::SettingsFieldResponse;
use crate::application::services::PublicProfile;
use crate::domain::settings::SETTINGS_FIELDS;
use crate::error::AppError;
use crate::state::AppState;

/// Public profile JSON of a slug, served from cache when possible.
///
/// # Endpoint
///
/// `GET /api/profiles/{slug}`
pub async fn public_profile_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PublicProfile>, AppError> {
    let profile = state.profile_service.public_profile(&slug).await?;
    Ok(Json(profile))
}

/// The settings form configuration, in display order.
///
/// # Endpoint
///
/// `GET /api/settings/fields`
pub async fn settings_fields_handler() -> Json<Vec<SettingsFieldResponse>> {
    Json(SETTINGS_FIELDS.iter().map(SettingsFieldResponse::from).collect())
}
