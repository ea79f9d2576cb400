//! Jotter HTTP server.
//!
//! Wires the core library into a running Axum server: configuration from the
//! environment, a signed session cookie carrying the session id, HTML pages,
//! and the document routes. Serves the whole UI at `/`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod state;
