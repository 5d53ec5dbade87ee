//! Core orchestration for wikidex.
//!
//! Ties the client and the wikitext parsers together into the one workflow
//! this tool exists for: rebuilding the interview catalogue page ([`sync`]).

pub mod pipeline;
pub mod tags;

pub use pipeline::{ProgressReporter, SilentProgress, SyncResult, sync};
