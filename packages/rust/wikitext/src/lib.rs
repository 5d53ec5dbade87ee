//! Pure wikitext parsing for wikidex.
//!
//! No I/O lives here: the crate turns raw page markup into templates
//! ([`template`]), extracts infobox fields into an [`InterviewRecord`]
//! ([`infobox`]), and normalizes fuzzy human-entered dates ([`date`]).
//!
//! [`InterviewRecord`]: wikidex_shared::InterviewRecord

pub mod date;
pub mod infobox;
pub mod template;

pub use date::parse_custom_date;
pub use infobox::{INFOBOX_FIELDS, extract_infobox_parameters};
pub use template::{Template, parse_templates};
