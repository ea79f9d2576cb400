//! Shared application state for the Jotter server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the document store, the session store,
//! and the configured credentials.

use jotter_core::{Credentials, DocumentStore, SessionStore};

use crate::config::ServerConfig;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// The filesystem document store.
    pub store: DocumentStore,
    /// Live sessions keyed by session id.
    pub sessions: SessionStore,
    /// Admin credentials checked by the login route.
    pub credentials: Credentials,
    /// Secret for signing the session cookie.
    pub session_secret: String,
}

impl AppState {
    /// Build the state from an opened store and the startup config.
    #[must_use]
    pub fn new(store: DocumentStore, config: &ServerConfig) -> Self {
        Self {
            store,
            sessions: SessionStore::new(),
            credentials: Credentials::new(
                config.admin_username.as_str(),
                config.admin_password.as_str(),
            ),
            session_secret: config.session_secret.clone(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
