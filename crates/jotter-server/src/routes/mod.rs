//! HTTP routes for the Jotter UI.
//!
//! Handlers are a thin composition layer: they consult the auth gate for
//! mutating routes, call into the document store, and dispatch viewing
//! through the content renderer. Redirects are literal `302 Found` so the
//! flash message set on the session is consumed by the next rendered page.

pub mod docs;
pub mod users;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware as axum_mw;
use axum::response::{IntoResponse, Response};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use jotter_core::auth::AuthDecision;

use crate::error::AppError;
use crate::middleware::session_middleware;
use crate::state::AppState;

/// Build the full application router with session and tracing layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(users::router())
        .merge(docs::router())
        .layer(axum_mw::from_fn_with_state(
            Arc::clone(&state),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

/// A `302 Found` redirect.
///
/// `axum::response::Redirect` only offers 303/307/308; the UI contract here
/// is a plain 302 after both GETs and form POSTs.
pub(crate) fn found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_owned())],
    )
        .into_response()
}

/// Gate a mutating route, mapping a denial to the login redirect.
///
/// On `Err` the sign-in flash has already been set and no store mutation
/// may take place.
pub(crate) async fn require_auth(state: &AppState, session_id: &str) -> Result<(), AppError> {
    match jotter_core::auth::require_auth(&state.sessions, session_id).await {
        AuthDecision::Allow => Ok(()),
        AuthDecision::Deny => Err(AppError::AuthRequired),
    }
}

/// The username to show in the page footer, if signed in.
pub(crate) async fn current_user(state: &AppState, session_id: &str) -> Option<String> {
    state.sessions.username(session_id).await
}
