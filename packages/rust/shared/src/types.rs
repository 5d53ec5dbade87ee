//! Domain types for the interview catalogue.

use serde::{Deserialize, Serialize};

/// One structured entry extracted from an interview page's infobox.
///
/// Every infobox field is `Option<String>` and serializes as JSON `null`
/// when the parameter is absent — consumers of the catalogue rely on the
/// keys always being present. `title` is always overwritten from the page
/// title (namespace prefix stripped), never taken from the infobox as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub part: Option<String>,
    pub title: Option<String>,
    pub cover: Option<String>,
    /// Raw human-entered date string ("March 5, 2020", "March 2020", "2020").
    pub date: Option<String>,
    /// Names split on the literal `", "` separator.
    pub interviewee: Option<Vec<String>>,
    pub translation: Option<String>,
    pub transcript: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub media: Option<String>,
    pub display: Option<String>,
    pub publication: Option<String>,
    /// Category-derived tags, filtered and priority-ordered.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The full result set written to the target page as one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterviewCollection {
    /// Records sorted ascending by normalized publication date.
    pub interviews: Vec<InterviewRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_serialize_as_null_keys() {
        let record = InterviewRecord {
            title: Some("Weekly Shonen Jump 1993".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).expect("serialize record");
        let obj = value.as_object().expect("record is an object");

        // Null, not absent.
        assert!(obj.contains_key("date"));
        assert!(obj["date"].is_null());
        assert!(obj.contains_key("interviewee"));
        assert!(obj["interviewee"].is_null());
        // `kind` goes over the wire as `type`.
        assert!(obj.contains_key("type"));
        assert!(!obj.contains_key("kind"));
        assert_eq!(obj["tags"], serde_json::json!([]));
    }

    #[test]
    fn collection_has_single_top_level_key() {
        let collection = InterviewCollection::default();
        let value = serde_json::to_value(&collection).expect("serialize collection");
        let obj = value.as_object().expect("collection is an object");
        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key("interviews"));
    }
}
