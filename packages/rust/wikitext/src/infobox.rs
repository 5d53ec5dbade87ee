//! Infobox field extraction.
//!
//! An interview page's canonical metadata lives in its infobox template.
//! Extraction is best-effort per field: an absent parameter is `None`, never
//! an error. A page without any infobox yields no record at all.

use tracing::debug;
use wikidex_shared::InterviewRecord;

use crate::template::parse_templates;

/// The fixed set of infobox parameters carried into the catalogue.
pub const INFOBOX_FIELDS: [&str; 11] = [
    "part",
    "title",
    "cover",
    "date",
    "interviewee",
    "translation",
    "transcript",
    "type",
    "media",
    "display",
    "publication",
];

/// Separator between individual names in the `interviewee` parameter.
const INTERVIEWEE_SEPARATOR: &str = ", ";

/// Extract infobox parameters from raw page markup.
///
/// Returns `None` when the page has no template whose name matches
/// "Infobox" (case-insensitive substring) — the caller skips such pages
/// entirely rather than emitting a partial record. When several infoboxes
/// are present only the first is authoritative; they are never merged.
///
/// `tags` and the final `title` are the orchestrator's responsibility and
/// are left empty/infobox-valued here.
pub fn extract_infobox_parameters(markup: &str) -> Option<InterviewRecord> {
    let infobox = parse_templates(markup)
        .into_iter()
        .find(|t| t.name.to_ascii_lowercase().contains("infobox"))?;

    debug!(template = %infobox.name, "extracting infobox parameters");

    let field = |name: &str| infobox.get(name).map(|v| v.trim().to_string());

    Some(InterviewRecord {
        part: field("part"),
        title: field("title"),
        cover: field("cover"),
        date: field("date"),
        interviewee: infobox.get("interviewee").map(|v| {
            v.trim()
                .split(INTERVIEWEE_SEPARATOR)
                .map(str::to_string)
                .collect()
        }),
        translation: field("translation"),
        transcript: field("transcript"),
        kind: field("type"),
        media: field("media"),
        display: field("display"),
        publication: field("publication"),
        tags: Vec::new(),
    })
}
