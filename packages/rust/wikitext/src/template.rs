//! Minimal wikitext template scanner.
//!
//! Finds `{{Name |key = value |...}}` structures in raw markup, including
//! templates nested inside another template's parameter values. Parameter
//! splitting is depth-aware: `|` inside nested `{{...}}` or `[[...|...]]`
//! links never starts a new parameter.
//!
//! All delimiters are ASCII, so byte-index slicing is char-boundary safe.

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A parsed template occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// Template name, surrounding whitespace trimmed.
    pub name: String,
    /// Parameters in source order.
    pub params: Vec<Param>,
}

/// A single template parameter, named (`key=value`) or positional.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name for `key=value` parameters, `None` for positional ones.
    pub name: Option<String>,
    /// Raw value text, untrimmed.
    pub value: String,
}

impl Template {
    /// Look up a named parameter's raw value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
            .map(|p| p.value.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Parse all templates in `markup`, in document order (outer before nested).
///
/// Unclosed `{{` runs are skipped rather than treated as errors — page
/// markup in the wild is not guaranteed to be well formed.
pub fn parse_templates(markup: &str) -> Vec<Template> {
    let bytes = markup.as_bytes();
    let mut templates = Vec::new();
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            match find_closing(bytes, i) {
                Some(end) => {
                    let body = &markup[i + 2..end];
                    templates.push(parse_template_body(body));
                    // Nested templates live inside parameter values.
                    templates.extend(parse_templates(body));
                    i = end + 2;
                }
                None => i += 1,
            }
        } else {
            i += 1;
        }
    }

    templates
}

/// Find the byte index of the `}}` matching the `{{` at `start`.
fn find_closing(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = start;

    while i + 1 < bytes.len() {
        if bytes[i] == b'{' && bytes[i + 1] == b'{' {
            depth += 1;
            i += 2;
        } else if bytes[i] == b'}' && bytes[i + 1] == b'}' {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
            i += 2;
        } else {
            i += 1;
        }
    }

    None
}

/// Parse the text between `{{` and `}}` into a name and parameters.
fn parse_template_body(body: &str) -> Template {
    let parts = split_top_level(body, b'|');
    let name = parts[0].trim().to_string();

    let params = parts[1..]
        .iter()
        .map(|part| match split_once_top_level(part, b'=') {
            Some((key, value)) => Param {
                name: Some(key.trim().to_string()),
                value: value.to_string(),
            },
            None => Param {
                name: None,
                value: part.to_string(),
            },
        })
        .collect();

    Template { name, params }
}

/// Split `text` on `sep`, ignoring separators inside `{{...}}` or `[[...]]`.
fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut braces = 0usize;
    let mut brackets = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if i + 1 < bytes.len() {
            match (bytes[i], bytes[i + 1]) {
                (b'{', b'{') => {
                    braces += 1;
                    i += 2;
                    continue;
                }
                (b'}', b'}') => {
                    braces = braces.saturating_sub(1);
                    i += 2;
                    continue;
                }
                (b'[', b'[') => {
                    brackets += 1;
                    i += 2;
                    continue;
                }
                (b']', b']') => {
                    brackets = brackets.saturating_sub(1);
                    i += 2;
                    continue;
                }
                _ => {}
            }
        }
        if bytes[i] == sep && braces == 0 && brackets == 0 {
            parts.push(&text[start..i]);
            start = i + 1;
        }
        i += 1;
    }

    parts.push(&text[start..]);
    parts
}

/// Like [`split_top_level`] but splits only on the first occurrence.
fn split_once_top_level(text: &str, sep: u8) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let mut braces = 0usize;
    let mut brackets = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        if i + 1 < bytes.len() {
            match (bytes[i], bytes[i + 1]) {
                (b'{', b'{') => {
                    braces += 1;
                    i += 2;
                    continue;
                }
                (b'}', b'}') => {
                    braces = braces.saturating_sub(1);
                    i += 2;
                    continue;
                }
                (b'[', b'[') => {
                    brackets += 1;
                    i += 2;
                    continue;
                }
                (b']', b']') => {
                    brackets = brackets.saturating_sub(1);
                    i += 2;
                    continue;
                }
                _ => {}
            }
        }
        if bytes[i] == sep && braces == 0 && brackets == 0 {
            return Some((&text[..i], &text[i + 1..]));
        }
        i += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_parameters() {
        let markup = "{{Infobox Interview|title = Great Days |date = June 15, 1998}}";
        let templates = parse_templates(markup);
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "Infobox Interview");
        assert_eq!(templates[0].get("title"), Some(" Great Days "));
        assert_eq!(templates[0].get("date"), Some(" June 15, 1998"));
        assert_eq!(templates[0].get("cover"), None);
    }

    #[test]
    fn pipe_inside_link_does_not_split() {
        let markup = "{{Infobox|media = [[Weekly Jump|WJ]] issue 42|part = 4}}";
        let templates = parse_templates(markup);
        assert_eq!(
            templates[0].get("media"),
            Some(" [[Weekly Jump|WJ]] issue 42")
        );
        assert_eq!(templates[0].get("part"), Some(" 4"));
    }

    #[test]
    fn nested_templates_appear_after_outer() {
        let markup = "{{Outer|a = {{Inner|b = 1}}}}";
        let templates = parse_templates(markup);
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].name, "Outer");
        assert_eq!(templates[0].get("a"), Some(" {{Inner|b = 1}}"));
        assert_eq!(templates[1].name, "Inner");
    }

    #[test]
    fn value_may_contain_equals() {
        let markup = "{{Infobox|cover = a=b=c}}";
        let templates = parse_templates(markup);
        assert_eq!(templates[0].get("cover"), Some(" a=b=c"));
    }

    #[test]
    fn positional_parameters_have_no_name() {
        let markup = "{{Quote|some text|author}}";
        let templates = parse_templates(markup);
        assert_eq!(templates[0].params.len(), 2);
        assert_eq!(templates[0].params[0].name, None);
        assert_eq!(templates[0].params[0].value, "some text");
    }

    #[test]
    fn unclosed_template_is_skipped() {
        let markup = "before {{Broken|a = 1 after";
        assert!(parse_templates(markup).is_empty());
    }

    #[test]
    fn multiple_templates_in_document_order() {
        let markup = "{{First|a=1}} text {{Second|b=2}}";
        let templates = parse_templates(markup);
        let names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
    }
}
