//! Public page routes.

use crate::state::AppState;
use crate::web::handlers::{go_handler, profile_page_handler};
use axum::{Router, routing::get};

/// # Endpoints
///
/// - `GET /{slug}` - Public profile page
/// - `GET /{slug}/go/{link_id}` - Count a click and redirect to the link target
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/{slug}", get(profile_page_handler))
        .route("/{slug}/go/{link_id}", get(go_handler))
}
