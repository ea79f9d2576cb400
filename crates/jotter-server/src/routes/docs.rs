//! Document routes: list, view, create, edit, delete.
//!
//! Viewing is public; every mutating route passes through the auth gate
//! before touching the store.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Form, Router};
use serde::Deserialize;

use jotter_core::{DocumentStore, RenderedView, StoreError, render};

use crate::error::AppError;
use crate::middleware::SessionId;
use crate::pages;
use crate::routes::{current_user, found, require_auth};
use crate::state::AppState;

/// Build the document router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/new", get(new_form).post(create))
        .route("/{file}", get(show))
        .route("/{file}/edit", get(edit_form).post(update))
        .route("/{file}/delete", post(delete))
}

// ── Form types ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct NewDocumentForm {
    name: String,
}

#[derive(Debug, Deserialize)]
struct EditForm {
    content: String,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// `GET /` — list all documents, consuming the pending flash.
async fn index(
    State(state): State<Arc<AppState>>,
    Extension(SessionId(sid)): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    let mut names = state.store.list().await?;
    names.sort();

    let flash = state.sessions.take_message(&sid).await;
    let user = current_user(&state, &sid).await;
    Ok(Html(pages::index_page(
        &names,
        flash.as_deref(),
        user.as_deref(),
    )))
}

/// `GET /{file}` — render a document, or redirect home with a flash when it
/// does not exist.
async fn show(
    State(state): State<Arc<AppState>>,
    Extension(SessionId(sid)): Extension<SessionId>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    if !state.store.exists(&file).await {
        state
            .sessions
            .set_message(&sid, format!("{file} does not exist"))
            .await;
        return Ok(found("/"));
    }

    let bytes = state.store.read(&file).await?;
    match render::render_for_view(&file, &bytes)? {
        RenderedView::PlainText(body) => {
            Ok(([(header::CONTENT_TYPE, "text/plain")], body).into_response())
        }
        RenderedView::Html(fragment) => {
            let user = current_user(&state, &sid).await;
            Ok(Html(pages::document_page(&file, &fragment, user.as_deref())).into_response())
        }
    }
}

/// `GET /new` — the creation form. Requires auth.
async fn new_form(
    State(state): State<Arc<AppState>>,
    Extension(SessionId(sid)): Extension<SessionId>,
) -> Result<Html<String>, AppError> {
    require_auth(&state, &sid).await?;
    let user = current_user(&state, &sid).await;
    Ok(Html(pages::new_page(None, user.as_deref())))
}

/// `POST /new` — create an empty document. Requires auth.
///
/// An invalid name re-renders the form with 422 and the message inline;
/// no redirect happens, so the flash is left untouched.
async fn create(
    State(state): State<Arc<AppState>>,
    Extension(SessionId(sid)): Extension<SessionId>,
    Form(form): Form<NewDocumentForm>,
) -> Result<Response, AppError> {
    require_auth(&state, &sid).await?;

    let name = match DocumentStore::normalize_name(&form.name) {
        Ok(name) => name,
        Err(StoreError::InvalidName { reason }) => {
            let user = current_user(&state, &sid).await;
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(pages::new_page(Some(&reason), user.as_deref())),
            )
                .into_response());
        }
        Err(other) => return Err(other.into()),
    };

    state.store.write(&name, b"").await?;
    state
        .sessions
        .set_message(&sid, format!("{name} was created."))
        .await;
    Ok(found("/"))
}

/// `GET /{file}/edit` — the edit form, pre-filled. Requires auth.
///
/// A file that vanished between listing and read surfaces as a server
/// error; that window is not specially handled.
async fn edit_form(
    State(state): State<Arc<AppState>>,
    Extension(SessionId(sid)): Extension<SessionId>,
    Path(file): Path<String>,
) -> Result<Html<String>, AppError> {
    require_auth(&state, &sid).await?;

    let bytes = state.store.read(&file).await?;
    let content = String::from_utf8_lossy(&bytes);
    let user = current_user(&state, &sid).await;
    Ok(Html(pages::edit_page(&file, &content, user.as_deref())))
}

/// `POST /{file}/edit` — fully overwrite the document. Requires auth.
async fn update(
    State(state): State<Arc<AppState>>,
    Extension(SessionId(sid)): Extension<SessionId>,
    Path(file): Path<String>,
    Form(form): Form<EditForm>,
) -> Result<Response, AppError> {
    require_auth(&state, &sid).await?;

    state.store.write(&file, form.content.as_bytes()).await?;
    state
        .sessions
        .set_message(&sid, format!("{file} has been updated."))
        .await;
    Ok(found("/"))
}

/// `POST /{file}/delete` — remove the document. Requires auth. Irreversible.
async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(SessionId(sid)): Extension<SessionId>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    require_auth(&state, &sid).await?;

    state.store.delete(&file).await?;
    state
        .sessions
        .set_message(&sid, format!("{file} was deleted"))
        .await;
    Ok(found("/"))
}
