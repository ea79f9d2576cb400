//! Session middleware for the Jotter server.
//!
//! Every request carries a session id in a signed cookie. The middleware
//! verifies the signature, checks that the session is still live, and
//! injects the id into the request extensions for handlers. Requests with
//! no cookie (or a tampered one) get a fresh anonymous session and a
//! `Set-Cookie` on the response.
//!
//! The cookie value is `{id}.{hex(hmac_sha256(secret, id))}`. The id itself
//! is random; the signature stops clients minting ids of their choosing.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::middleware::Next;
use axum::response::Response;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "jotter_session";

/// The verified session id for the current request.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

/// Middleware that resolves (or creates) the request's session.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let presented = req
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|header| cookie_from_header(header, SESSION_COOKIE))
        .and_then(|value| verify_cookie(&state.session_secret, &value));

    let (id, fresh) = match presented {
        Some(id) if state.sessions.contains(&id).await => (id, false),
        _ => (state.sessions.create().await, true),
    };

    req.extensions_mut().insert(SessionId(id.clone()));
    let mut response = next.run(req).await;

    if fresh {
        let cookie = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            cookie_value(&state.session_secret, &id)
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Build the signed cookie value for a session id.
#[must_use]
pub fn cookie_value(secret: &str, id: &str) -> String {
    format!("{id}.{}", sign(secret, id))
}

/// Verify a presented cookie value, returning the session id if the
/// signature checks out.
fn verify_cookie(secret: &str, value: &str) -> Option<String> {
    let (id, tag) = value.split_once('.')?;
    let expected = sign(secret, id);
    if bool::from(expected.as_bytes().ct_eq(tag.as_bytes())) {
        Some(id.to_owned())
    } else {
        None
    }
}

/// Hex-encoded HMAC-SHA256 of the session id.
#[allow(clippy::missing_panics_doc)]
fn sign(secret: &str, id: &str) -> String {
    // HMAC-SHA256 accepts any key length per RFC 2104, so new_from_slice
    // will never fail here.
    #[allow(clippy::unwrap_used)]
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Pull a single cookie's value out of a `Cookie` request header.
fn cookie_from_header(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then(|| v.to_owned())
    })
}
