//! DTOs for signup and slug availability.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::profile::ProfileResponse;
use crate::application::services::SignupInput;
use crate::domain::session::View;

/// Request body for `POST /api/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "Slug must be 1-64 characters"))]
    pub slug: String,

    /// Opaque identity of the account that owns the profile.
    #[validate(length(min = 1, max = 255, message = "Owner is required"))]
    pub owner: String,
}

impl From<SignupRequest> for SignupInput {
    fn from(req: SignupRequest) -> Self {
        Self {
            name: req.name,
            slug: req.slug,
            owner: req.owner,
        }
    }
}

/// Response for a successful signup.
///
/// `token` is shown once and cannot be recovered later.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub business: ProfileResponse,
    pub token: String,
    pub public_url: String,
    pub view: View,
}

/// Response for `GET /api/slugs/{slug}`.
#[derive(Debug, Serialize)]
pub struct SlugAvailabilityResponse {
    pub slug: String,
    pub available: bool,
}
