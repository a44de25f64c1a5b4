//! API route configuration.

use crate::api::handlers::{
    click_handler, create_link_handler, delete_link_handler, get_profile_handler,
    list_links_handler, public_profile_handler, reorder_links_handler, settings_fields_handler,
    sign_in_handler, sign_out_handler, signup_handler, slug_availability_handler,
    update_profile_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Read-only endpoints that need no authentication.
///
/// # Endpoints
///
/// - `GET /profiles/{slug}`  - Public profile JSON
/// - `GET /settings/fields`  - Settings form configuration
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/profiles/{slug}", get(public_profile_handler))
        .route("/settings/fields", get(settings_fields_handler))
}

/// Signup and slug pre-check.
///
/// # Endpoints
///
/// - `POST /signup`        - Create a business and its first token
/// - `GET  /slugs/{slug}`  - Slug availability
pub fn signup_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup_handler))
        .route("/slugs/{slug}", get(slug_availability_handler))
}

/// Fire-and-forget click tracking.
///
/// # Endpoints
///
/// - `POST /clicks` - Queue a click
pub fn click_routes() -> Router<AppState> {
    Router::new().route("/clicks", post(click_handler))
}

/// Endpoints acting for the business behind the bearer token.
///
/// # Endpoints
///
/// - `POST   /session`        - Sign in (load the board)
/// - `DELETE /session`        - Sign out (tear the board down)
/// - `GET    /links`          - Current board
/// - `POST   /links`          - Append a link
/// - `DELETE /links/{id}`     - Remove a link
/// - `POST   /links/reorder`  - Move a link onto another's slot
/// - `GET    /profile`        - Profile settings
/// - `PATCH  /profile`        - Save profile settings
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(sign_in_handler).delete(sign_out_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/reorder", post(reorder_links_handler))
        .route("/links/{id}", delete(delete_link_handler))
        .route(
            "/profile",
            get(get_profile_handler).patch(update_profile_handler),
        )
}
