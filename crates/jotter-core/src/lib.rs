//! Core library for Jotter.
//!
//! Everything here is HTTP-agnostic: the document store resolves names to
//! files under a single root directory, the renderer turns stored bytes into
//! a viewable representation, and the session store plus auth gate decide
//! whether a mutation is allowed. The `jotter-server` crate wires these into
//! Axum handlers.

pub mod auth;
pub mod error;
pub mod render;
pub mod session;
pub mod store;

pub use auth::{AuthDecision, Credentials};
pub use error::{RenderError, StoreError};
pub use render::{DocumentKind, RenderedView};
pub use session::SessionStore;
pub use store::DocumentStore;
