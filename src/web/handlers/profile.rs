//! Public profile page and outbound link redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::application::services::PublicProfile;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the public profile page.
///
/// Renders `templates/profile.html`: name, description, the ordered links,
/// contact details and a WhatsApp share link, tinted with the theme colour.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub profile: PublicProfile,
}

/// Renders the public page of a business.
///
/// # Endpoint
///
/// `GET /{slug}`
pub async fn profile_page_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ProfileTemplate, AppError> {
    let profile = state.profile_service.public_profile(&slug).await?;
    Ok(ProfileTemplate { profile })
}

/// Queues a click and redirects to the link target.
///
/// # Endpoint
///
/// `GET /{slug}/go/{link_id}`
///
/// Answers `307 Temporary Redirect` so browsers come back through here and
/// every visit is counted.
pub async fn go_handler(
    State(state): State<AppState>,
    Path((slug, link_id)): Path<(String, i64)>,
) -> Result<Redirect, AppError> {
    let target = state.profile_service.link_target(&slug, link_id).await?;
    state.track_click(link_id);

    Ok(Redirect::temporary(&target))
}
