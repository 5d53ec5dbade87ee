//! MediaWiki API client for wikidex.
//!
//! Thin, typed wrapper over the handful of API actions the sync run needs:
//! tokens, login, namespace enumeration, revision content, categories, edit.

pub mod api;
pub mod client;

pub use client::WikiClient;
