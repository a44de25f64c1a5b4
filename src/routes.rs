//! Top-level router configuration combining API and page routes.
//!
//! # Route Structure
//!
//! - `GET  /health`               - Health check: store, cache, click queue
//! - `GET  /{slug}`               - Public profile page
//! - `GET  /{slug}/go/{link_id}`  - Click redirect
//! - `/api/*`                     - JSON API (bearer token for owner routes)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on signup and clicks
//! - **Authentication** - Bearer token on owner routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with trailing-slash normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limited` - apply per-IP limits to signup and click routes; the
///   server must then be started with connect info
pub fn app_router(state: AppState, rate_limited: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, rate_limited))
}

/// All routes and middleware, without path normalization.
pub fn router(state: AppState, rate_limited: bool) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let (signup, clicks) = if rate_limited {
        (
            api::routes::signup_routes().layer(rate_limit::signup_layer()),
            api::routes::click_routes().layer(rate_limit::clicks_layer()),
        )
    } else {
        (api::routes::signup_routes(), api::routes::click_routes())
    };

    let api_router = Router::new()
        .merge(api::routes::public_routes())
        .merge(signup)
        .merge(clicks)
        .merge(protected);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(web::routes::public_routes())
        .with_state(state)
        .layer(tracing::layer())
}
