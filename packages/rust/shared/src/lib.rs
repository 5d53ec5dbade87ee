//! Shared types, error model, and configuration for wikidex.
//!
//! This crate is the foundation depended on by all other wikidex crates.
//! It provides:
//! - [`WikidexError`] — the unified error type
//! - Domain types ([`InterviewRecord`], [`InterviewCollection`])
//! - Configuration ([`AppConfig`], [`SyncConfig`], credential resolution)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, Credentials, SyncConfig, SyncDefaults, WikiConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, resolve_api_url, resolve_credentials,
};
pub use error::{Result, WikidexError};
pub use types::{InterviewCollection, InterviewRecord};
