//! HTTP error types for the Jotter server.
//!
//! Maps core errors into responses. Handlers recover the interesting cases
//! locally (missing document on view, invalid submitted name); whatever
//! reaches [`AppError`] is either the auth-gate redirect or a genuine
//! server-side failure.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use jotter_core::{RenderError, StoreError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// A mutating route was hit without an authenticated session. The flash
    /// has already been set by the auth gate; redirect to the login page.
    AuthRequired,
    /// The document store failed.
    Store(StoreError),
    /// The viewed document has no renderable representation.
    Render(RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthRequired => (
                StatusCode::FOUND,
                [(header::LOCATION, "/users/login")],
            )
                .into_response(),
            Self::Store(StoreError::InvalidName { reason }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, reason).into_response()
            }
            Self::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.").into_response()
            }
            Self::Render(err) => {
                tracing::error!(error = %err, "document is not renderable");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.").into_response()
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}
