//! Handlers for signup and slug availability.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::signup::{SignupRequest, SignupResponse, SlugAvailabilityResponse};
use crate::domain::session::{View, ViewEvent};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a business profile and its first bearer token.
///
/// # Endpoint
///
/// `POST /api/signup`
///
/// # Request Body
///
/// ```json
/// { "name": "Corner Cafe", "slug": "corner-cafe", "owner": "user-123" }
/// ```
///
/// # Errors
///
/// - 400 on a blank name/owner or malformed slug
/// - 409 "Slug is already taken. Try another one."
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    payload.validate()?;

    let business = state.profile_service.signup(payload.into()).await?;
    let token = state
        .auth_service
        .issue_token(business.id, "signup")
        .await?;
    let public_url = state.profile_service.public_url(&business.slug);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            business: business.into(),
            token,
            public_url,
            view: View::Signup.on(ViewEvent::SignedIn, true),
        }),
    ))
}

/// Reports whether a slug is free.
///
/// # Endpoint
///
/// `GET /api/slugs/{slug}`
pub async fn slug_availability_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SlugAvailabilityResponse>, AppError> {
    let (slug, available) = state.profile_service.slug_available(&slug).await?;
    Ok(Json(SlugAvailabilityResponse { slug, available }))
}
