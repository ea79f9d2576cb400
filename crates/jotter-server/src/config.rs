//! Server configuration for Jotter.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The config struct is built once at startup and handed to the subsystems
//! that need it; nothing reads the process environment after boot.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Root directory of the document store.
    pub data_dir: PathBuf,
    /// Secret used to sign the session cookie.
    pub session_secret: String,
    /// Admin username for the login form.
    pub admin_username: String,
    /// Admin password for the login form.
    pub admin_password: String,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `JOTTER_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:7878`)
    /// - `JOTTER_DATA_DIR` — document store root (overrides the mode default)
    /// - `JOTTER_ENV` — `test` selects `tests/data`, anything else `data`
    /// - `JOTTER_SESSION_SECRET` — session cookie signing secret
    /// - `JOTTER_USERNAME` — admin username (default: `admin`)
    /// - `JOTTER_PASSWORD` — admin password (default: `secret`)
    /// - `JOTTER_LOG_LEVEL` — log filter (default: `info`)
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = if let Ok(addr) = std::env::var("JOTTER_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 7878)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(7878);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 7878))
        };

        // The store root is a pure function of the execution mode, fixed at
        // process start; an explicit dir override wins.
        let data_dir = std::env::var("JOTTER_DATA_DIR").map_or_else(
            |_| {
                if std::env::var("JOTTER_ENV").as_deref() == Ok("test") {
                    PathBuf::from("tests/data")
                } else {
                    PathBuf::from("data")
                }
            },
            PathBuf::from,
        );

        let session_secret = std::env::var("JOTTER_SESSION_SECRET")
            .unwrap_or_else(|_| "jotter-insecure-dev-secret".to_owned());

        let admin_username =
            std::env::var("JOTTER_USERNAME").unwrap_or_else(|_| "admin".to_owned());
        let admin_password =
            std::env::var("JOTTER_PASSWORD").unwrap_or_else(|_| "secret".to_owned());

        let log_level = std::env::var("JOTTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        Self {
            bind_addr,
            data_dir,
            session_secret,
            admin_username,
            admin_password,
            log_level,
        }
    }
}
