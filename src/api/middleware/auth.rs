//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticates `Authorization: Bearer <token>` and attaches the session.
///
/// On success a [`crate::domain::session::SessionContext`] is inserted into
/// the request extensions; protected handlers take it with
/// `Extension<SessionContext>` instead of reading any shared state.
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header is
/// missing or malformed, or the token is unknown or revoked.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/links", get(list_links_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let session = st.auth_service.authenticate(&token).await?;
    tracing::debug!(business_id = session.business_id, "Request authenticated");

    parts.extensions.insert(session);
    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
