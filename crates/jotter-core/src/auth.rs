//! Credential checks and the session-authentication gate.
//!
//! Credentials are compared with `subtle::ConstantTimeEq` to avoid leaking
//! match length through timing. The observable pass/fail behavior is plain
//! string equality with no normalization or hashing.

use subtle::ConstantTimeEq;

use crate::session::SessionStore;

/// Flash shown when an unauthenticated session attempts a mutation.
pub const SIGNIN_REQUIRED_MESSAGE: &str = "You must be signed in to do that.";
/// Flash set by a successful login.
pub const WELCOME_MESSAGE: &str = "Welcome!";
/// Flash set by logout.
pub const SIGNED_OUT_MESSAGE: &str = "You have been signed out.";

/// The configured admin credential pair, read once at startup.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check a submitted pair against the configured values.
    ///
    /// Both fields are always compared so a username mismatch costs the same
    /// as a password mismatch.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Outcome of the auth gate for a mutating route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    /// The session is authenticated; the route body may run.
    Allow,
    /// Unauthenticated. The sign-in flash has been set; the caller must
    /// redirect to the login page and perform no store mutation.
    Deny,
}

/// Gate a mutating route on the session's signed-in state.
///
/// On denial the flash message is set here so every handler redirects with
/// the same text.
pub async fn require_auth(sessions: &SessionStore, session_id: &str) -> AuthDecision {
    if sessions.is_signed_in(session_id).await {
        AuthDecision::Allow
    } else {
        sessions
            .set_message(session_id, SIGNIN_REQUIRED_MESSAGE)
            .await;
        AuthDecision::Deny
    }
}

/// Transition a session to `Authenticated` and set the welcome flash.
pub async fn sign_in(sessions: &SessionStore, session_id: &str, username: &str) {
    sessions.sign_in(session_id, username).await;
    sessions.set_message(session_id, WELCOME_MESSAGE).await;
}

/// Transition a session back to `Anonymous` and set the signed-out flash.
pub async fn sign_out(sessions: &SessionStore, session_id: &str) {
    sessions.sign_out(session_id).await;
    sessions.set_message(session_id, SIGNED_OUT_MESSAGE).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_is_exact_match_only() {
        let creds = Credentials::new("admin", "secret");
        assert!(creds.verify("admin", "secret"));
        assert!(!creds.verify("admIn", "secret"));
        assert!(!creds.verify("admin", "Secret"));
        assert!(!creds.verify("admin", ""));
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials::new("admin", "secret");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("admin"));
    }

    #[tokio::test]
    async fn gate_denies_anonymous_and_sets_flash() {
        let sessions = SessionStore::new();
        let id = sessions.create().await;

        let decision = require_auth(&sessions, &id).await;
        assert_eq!(decision, AuthDecision::Deny);
        assert_eq!(
            sessions.take_message(&id).await.as_deref(),
            Some(SIGNIN_REQUIRED_MESSAGE)
        );
    }

    #[tokio::test]
    async fn gate_allows_authenticated_sessions() {
        let sessions = SessionStore::new();
        let id = sessions.create().await;
        sign_in(&sessions, &id, "admin").await;

        assert_eq!(require_auth(&sessions, &id).await, AuthDecision::Allow);
    }

    #[tokio::test]
    async fn sign_in_and_out_set_the_expected_flashes() {
        let sessions = SessionStore::new();
        let id = sessions.create().await;

        sign_in(&sessions, &id, "admin").await;
        assert_eq!(
            sessions.take_message(&id).await.as_deref(),
            Some(WELCOME_MESSAGE)
        );

        sign_out(&sessions, &id).await;
        assert_eq!(
            sessions.take_message(&id).await.as_deref(),
            Some(SIGNED_OUT_MESSAGE)
        );
        assert!(!sessions.is_signed_in(&id).await);
    }
}
