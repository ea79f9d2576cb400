//! Error types for `jotter-core`.
//!
//! Each variant carries enough context to diagnose the problem without a
//! debugger. Document names appear in errors verbatim; they are user-visible
//! identifiers, not secrets.

/// Errors from the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested document does not exist (or could not be read).
    #[error("{name} does not exist")]
    NotFound { name: String },

    /// The submitted document name is empty or otherwise invalid.
    #[error("{reason}")]
    InvalidName { reason: String },

    /// The underlying filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the content renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The document's extension is neither `.txt` nor `.md`.
    #[error("unsupported file extension for '{name}'")]
    UnsupportedExtension { name: String },
}
