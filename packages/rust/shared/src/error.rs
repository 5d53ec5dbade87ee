//! Error types for wikidex.
//!
//! Library crates use [`WikidexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all wikidex operations.
#[derive(Debug, thiserror::Error)]
pub enum WikidexError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error talking to the wiki API.
    #[error("network error: {0}")]
    Network(String),

    /// Login rejected by the wiki API.
    #[error("auth error: {message}")]
    Auth { message: String },

    /// The API answered, but not in the shape we expect.
    #[error("api error: {message}")]
    Api { message: String },

    /// Wikitext or response parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The edit to the target page was refused.
    #[error("edit error: {0}")]
    Edit(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WikidexError>;

impl WikidexError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an auth error from any displayable message.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth {
            message: msg.into(),
        }
    }

    /// Create an api error from any displayable message.
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
