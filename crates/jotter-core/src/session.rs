//! In-memory session store.
//!
//! Sessions are keyed by a random id and hold per-browser state: the
//! signed-in flag, the username, and at most one transient flash message.
//! The flash is consumed atomically by [`SessionStore::take_message`] so a
//! message shown once never leaks into the next unrelated request.
//!
//! The map is process-local; sessions expire with the process. Growth is
//! bounded by [`MAX_SESSIONS`]: once the cap is reached, idle anonymous
//! sessions are evicted before a new one is inserted. Cookie transport and
//! integrity are the server crate's concern.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Soft cap on live sessions. Signed-in sessions and sessions holding an
/// unread flash are never evicted, so the map can exceed this briefly.
pub const MAX_SESSIONS: usize = 10_000;

/// Per-browser session state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Whether this session has passed the credential check.
    pub signed_in: bool,
    /// The signed-in username, if any.
    pub username: Option<String>,
    /// One-shot flash message, consumed on read.
    pub message: Option<String>,
}

/// Store of all live sessions, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh anonymous session and return its id.
    ///
    /// At [`MAX_SESSIONS`] live entries, idle anonymous sessions are evicted
    /// first. Every cookieless request mints a session, so without this the
    /// map would grow for the life of the process.
    pub async fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= MAX_SESSIONS {
            sessions.retain(|_, s| s.signed_in || s.message.is_some());
        }
        sessions.insert(id.clone(), Session::default());
        id
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are live.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Check whether a session id refers to a live session.
    pub async fn contains(&self, id: &str) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    /// Whether the session has authenticated.
    pub async fn is_signed_in(&self, id: &str) -> bool {
        self.sessions
            .read()
            .await
            .get(id)
            .is_some_and(|s| s.signed_in)
    }

    /// The signed-in username for this session, if any.
    pub async fn username(&self, id: &str) -> Option<String> {
        self.sessions
            .read()
            .await
            .get(id)
            .and_then(|s| s.username.clone())
    }

    /// Mark the session as signed in under `username`.
    pub async fn sign_in(&self, id: &str, username: &str) {
        if let Some(session) = self.sessions.write().await.get_mut(id) {
            session.signed_in = true;
            session.username = Some(username.to_owned());
        }
    }

    /// Clear the signed-in flag and username.
    pub async fn sign_out(&self, id: &str) {
        if let Some(session) = self.sessions.write().await.get_mut(id) {
            session.signed_in = false;
            session.username = None;
        }
    }

    /// Set the one-shot flash message, replacing any unread one.
    pub async fn set_message(&self, id: &str, message: impl Into<String>) {
        if let Some(session) = self.sessions.write().await.get_mut(id) {
            session.message = Some(message.into());
        }
    }

    /// Take the flash message, clearing it in the same operation.
    pub async fn take_message(&self, id: &str) -> Option<String> {
        self.sessions
            .write()
            .await
            .get_mut(id)
            .and_then(|s| s.message.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_sessions_are_anonymous() {
        let store = SessionStore::new();
        let id = store.create().await;
        assert!(store.contains(&id).await);
        assert!(!store.is_signed_in(&id).await);
        assert!(store.username(&id).await.is_none());
    }

    #[tokio::test]
    async fn sign_in_then_out_round_trips() {
        let store = SessionStore::new();
        let id = store.create().await;

        store.sign_in(&id, "admin").await;
        assert!(store.is_signed_in(&id).await);
        assert_eq!(store.username(&id).await.as_deref(), Some("admin"));

        store.sign_out(&id).await;
        assert!(!store.is_signed_in(&id).await);
        assert!(store.username(&id).await.is_none());
    }

    #[tokio::test]
    async fn flash_message_is_one_shot() {
        let store = SessionStore::new();
        let id = store.create().await;

        store.set_message(&id, "Welcome!").await;
        assert_eq!(store.take_message(&id).await.as_deref(), Some("Welcome!"));
        assert!(store.take_message(&id).await.is_none());
    }

    #[tokio::test]
    async fn idle_anonymous_sessions_are_evicted_at_the_cap() {
        let store = SessionStore::new();
        let keeper = store.create().await;
        store.sign_in(&keeper, "admin").await;
        let flashed = store.create().await;
        store.set_message(&flashed, "pending").await;

        for _ in 0..MAX_SESSIONS {
            store.create().await;
        }

        assert!(store.len().await <= MAX_SESSIONS);
        assert!(store.contains(&keeper).await);
        assert!(store.contains(&flashed).await);
    }

    #[tokio::test]
    async fn unknown_ids_are_inert() {
        let store = SessionStore::new();
        store.sign_in("nope", "admin").await;
        assert!(!store.is_signed_in("nope").await);
        assert!(store.take_message("nope").await.is_none());
    }
}
