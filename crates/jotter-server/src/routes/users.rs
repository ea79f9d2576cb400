//! Login and logout routes: `/users/*`
//!
//! A failed login re-renders the form with 422 and an inline message so the
//! failure is visible without depending on flash persistence. Success and
//! logout redirect home with the usual flash.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Form, Router};
use serde::Deserialize;

use jotter_core::auth;

use crate::middleware::SessionId;
use crate::pages;
use crate::routes::found;
use crate::state::AppState;

/// Build the `/users` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/login", get(login_form).post(login))
        .route("/users/logout", post(logout))
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

/// `GET /users/login` — the login form, showing any pending flash (e.g. the
/// auth-gate redirect message).
async fn login_form(
    State(state): State<Arc<AppState>>,
    Extension(SessionId(sid)): Extension<SessionId>,
) -> Html<String> {
    let flash = state.sessions.take_message(&sid).await;
    Html(pages::login_page(flash.as_deref(), None, ""))
}

/// `POST /users/login` — check credentials.
async fn login(
    State(state): State<Arc<AppState>>,
    Extension(SessionId(sid)): Extension<SessionId>,
    Form(form): Form<LoginForm>,
) -> Response {
    if state.credentials.verify(&form.username, &form.password) {
        auth::sign_in(&state.sessions, &sid, &form.username).await;
        tracing::info!(username = %form.username, "login succeeded");
        found("/")
    } else {
        tracing::warn!(username = %form.username, "login failed");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::login_page(
                None,
                Some("Invalid Credentials"),
                &form.username,
            )),
        )
            .into_response()
    }
}

/// `POST /users/logout` — clear the signed-in state.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(SessionId(sid)): Extension<SessionId>,
) -> Response {
    auth::sign_out(&state.sessions, &sid).await;
    found("/")
}
