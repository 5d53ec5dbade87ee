//! End-to-end sync run: enumerate → extract → tag → sort → write back.
//!
//! Fully sequential by design. A failed login or per-page fetch terminates
//! the run; a page without an infobox or a missing infobox field does not.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use wikidex_client::WikiClient;
use wikidex_shared::{InterviewCollection, Result, SyncConfig, WikidexError};
use wikidex_wikitext::{extract_infobox_parameters, parse_custom_date};

use crate::tags;

/// Language-code suffixes marking already-translated page variants.
/// `Interview:Foo/fr` is the French rendering of `Interview:Foo` and must
/// not be catalogued independently.
pub const LANGUAGE_CODES: [&str; 15] = [
    "fr", "es", "ru", "it", "de", "nl", "pt-br", "fa", "ro", "pl", "he", "ur", "th", "sv", "ja",
];

/// Namespace prefix stripped from page titles in the output.
pub const TITLE_NAMESPACE_PREFIX: &str = "Interview:";

/// Content model declared for the written catalogue page.
const TARGET_CONTENT_MODEL: &str = "json";

// ---------------------------------------------------------------------------
// Result and progress reporting
// ---------------------------------------------------------------------------

/// Summary of a completed sync run.
#[derive(Debug, Clone)]
pub struct SyncResult {
    /// Titles enumerated in the namespace.
    pub pages_seen: usize,
    /// Titles skipped as translated variants.
    pub pages_skipped_translated: usize,
    /// Pages skipped for having no infobox.
    pub pages_skipped_no_infobox: usize,
    /// Records written to the catalogue.
    pub record_count: usize,
    /// Total duration of the run.
    pub elapsed: Duration,
}

/// Progress callback for reporting run status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called per enumerated page as it is considered.
    fn page_processed(&self, title: &str, current: usize, total: usize);
    /// Called when the run completes.
    fn done(&self, result: &SyncResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn page_processed(&self, _title: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &SyncResult) {}
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Is this title a `/<lang>` translated variant?
pub fn is_translated_variant(title: &str) -> bool {
    title
        .rsplit_once('/')
        .is_some_and(|(_, suffix)| LANGUAGE_CODES.contains(&suffix))
}

/// Run the full sync pipeline against an already-authenticated client.
///
/// 1. Enumerate the interview namespace
/// 2. Per page: fetch content, extract infobox, fetch + order tags
/// 3. Sort by normalized date (unparseable dates first)
/// 4. Serialize and write the catalogue page
#[instrument(skip_all, fields(namespace = config.namespace, target = %config.target_page))]
pub async fn sync(
    client: &WikiClient,
    config: &SyncConfig,
    progress: &dyn ProgressReporter,
) -> Result<SyncResult> {
    let start = Instant::now();

    progress.phase("Enumerating interview pages");
    let titles = client.list_namespace_pages(config.namespace).await?;
    let total = titles.len();
    info!(total, "enumerated namespace");

    let mut interviews = Vec::new();
    let mut skipped_translated = 0usize;
    let mut skipped_no_infobox = 0usize;

    for (index, title) in titles.iter().enumerate() {
        progress.page_processed(title, index + 1, total);

        if is_translated_variant(title) {
            debug!(%title, "skipping translated variant");
            skipped_translated += 1;
            continue;
        }

        let content = client.fetch_page_content(title).await?;
        let Some(mut record) = extract_infobox_parameters(&content) else {
            debug!(%title, "no infobox, skipping");
            skipped_no_infobox += 1;
            continue;
        };

        let categories = client.fetch_categories(title).await?;
        record.tags = tags::filter_and_order(categories);

        // The page title is authoritative; the infobox `title` value is not.
        record.title = Some(
            title
                .strip_prefix(TITLE_NAMESPACE_PREFIX)
                .unwrap_or(title)
                .to_string(),
        );

        interviews.push(record);
    }

    // Stable sort: records with equal (or unparseable) dates keep
    // enumeration order.
    interviews.sort_by_key(|record| parse_custom_date(record.date.as_deref().unwrap_or("")));

    let record_count = interviews.len();
    let collection = InterviewCollection { interviews };
    let body = serde_json::to_string(&collection)
        .map_err(|e| WikidexError::parse(format!("failed to serialize catalogue: {e}")))?;

    progress.phase("Writing catalogue page");
    client
        .edit_page(&config.target_page, &body, TARGET_CONTENT_MODEL)
        .await?;

    let result = SyncResult {
        pages_seen: total,
        pages_skipped_translated: skipped_translated,
        pages_skipped_no_infobox: skipped_no_infobox,
        record_count,
        elapsed: start.elapsed(),
    };

    info!(
        pages_seen = result.pages_seen,
        skipped_translated = result.pages_skipped_translated,
        skipped_no_infobox = result.pages_skipped_no_infobox,
        records = result.record_count,
        elapsed_ms = result.elapsed.as_millis(),
        "sync completed"
    );
    progress.done(&result);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translated_variants_are_detected() {
        assert!(is_translated_variant("Interview:Alpha/fr"));
        assert!(is_translated_variant("Interview:Alpha/pt-br"));
        assert!(is_translated_variant("Interview:Deep/Sub/ja"));

        assert!(!is_translated_variant("Interview:Alpha"));
        assert!(!is_translated_variant("Interview:Alpha/extra"));
        // A bare "fr" in the title without the slash is not a variant.
        assert!(!is_translated_variant("Interview:fr"));
    }
}

#[cfg(test)]
mod sync_tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{body_string_contains, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ALPHA_MARKUP: &str =
        "{{Infobox Interview|title = Alpha Exhibition|date = 2019|interviewee = Solo Author}}";
    const BETA_MARKUP: &str =
        "{{Infobox Interview|date = June 15, 1998|interviewee = A, B, C|type = Magazine}}";
    const GAMMA_MARKUP: &str = "{{Infobox Interview|date = January 2005}}";

    fn revisions_mock(title: &str, markup: &str) -> Mock {
        Mock::given(method("GET"))
            .and(query_param("prop", "revisions"))
            .and(query_param("titles", title))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"pages": {"1": {"title": title, "revisions": [{"*": markup}]}}}
            })))
    }

    fn categories_mock(title: &str, categories: &[&str]) -> Mock {
        let entries: Vec<_> = categories
            .iter()
            .map(|c| serde_json::json!({"title": c}))
            .collect();
        Mock::given(method("GET"))
            .and(query_param("prop", "categories"))
            .and(query_param("titles", title))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"pages": {"1": {"title": title, "categories": entries}}}
            })))
    }

    async fn mount_wiki(server: &MockServer) {
        Mock::given(method("GET"))
            .and(query_param("list", "allpages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"allpages": [
                    {"title": "Interview:Alpha"},
                    {"title": "Interview:Alpha/fr"},
                    {"title": "Interview:Beta"},
                    {"title": "Interview:Gamma"},
                    {"title": "Interview:Plain"},
                ]}
            })))
            .mount(server)
            .await;

        revisions_mock("Interview:Alpha", ALPHA_MARKUP).mount(server).await;
        revisions_mock("Interview:Beta", BETA_MARKUP).mount(server).await;
        revisions_mock("Interview:Gamma", GAMMA_MARKUP).mount(server).await;
        // No infobox at all on this one.
        revisions_mock("Interview:Plain", "Just prose, no template.")
            .mount(server)
            .await;

        categories_mock("Interview:Alpha", &["Category:Interviews"])
            .mount(server)
            .await;
        categories_mock(
            "Interview:Beta",
            &[
                "Category:Zeta Interviews",
                "Category:Interviews",
                "Category:Manga Interviews",
            ],
        )
        .mount(server)
        .await;
        categories_mock("Interview:Gamma", &["Category:Anime Interviews"])
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(query_param("type", "csrf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"tokens": {"csrftoken": "csrf123+\\"}}
            })))
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(body_string_contains("action=edit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "edit": {"result": "Success", "title": "JoJo_Wiki:Interviews"}
            })))
            .mount(server)
            .await;
    }

    /// Pull the urlencoded `text` field out of the captured edit POST.
    fn edit_body(requests: &[wiremock::Request]) -> String {
        let edit = requests
            .iter()
            .find(|r| {
                r.method.to_string().eq_ignore_ascii_case("POST")
                    && String::from_utf8_lossy(&r.body).contains("action=edit")
            })
            .expect("an edit request was made");

        url::form_urlencoded::parse(&edit.body)
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned())
            .expect("edit request carries a text field")
    }

    #[tokio::test]
    async fn full_run_writes_a_date_ordered_catalogue() {
        let server = MockServer::start().await;
        mount_wiki(&server).await;

        let client = WikiClient::new(Url::parse(&server.uri()).unwrap()).unwrap();
        let config = SyncConfig {
            namespace: 7000,
            target_page: "JoJo_Wiki:Interviews".into(),
        };

        let result = sync(&client, &config, &SilentProgress).await.expect("sync ok");

        assert_eq!(result.pages_seen, 5);
        assert_eq!(result.pages_skipped_translated, 1);
        assert_eq!(result.pages_skipped_no_infobox, 1);
        assert_eq!(result.record_count, 3);

        let requests = server.received_requests().await.expect("recording enabled");

        // The /fr variant is never fetched.
        assert!(
            !requests
                .iter()
                .any(|r| r.url.query().unwrap_or("").contains("Alpha%2Ffr")),
            "translated variant must not be fetched"
        );

        let written: InterviewCollection =
            serde_json::from_str(&edit_body(&requests)).expect("valid catalogue JSON");

        // 1998 before 2005 before 2019.
        let titles: Vec<_> = written
            .interviews
            .iter()
            .map(|r| r.title.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(titles, ["Beta", "Gamma", "Alpha"]);

        // Page title overrides the infobox title, prefix stripped.
        assert_eq!(written.interviews[2].title.as_deref(), Some("Alpha"));

        // Tags: excluded dropped, listed before unlisted.
        assert_eq!(written.interviews[0].tags, ["Manga", "Zeta"]);
        assert!(written.interviews[2].tags.is_empty());

        // Interviewee splitting survives the round trip.
        assert_eq!(
            written.interviews[0].interviewee,
            Some(vec!["A".into(), "B".into(), "C".into()])
        );
    }

    #[tokio::test]
    async fn api_shape_errors_terminate_the_run() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("list", "allpages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"allpages": [{"title": "Interview:Broken"}]}
            })))
            .mount(&server)
            .await;

        // Revisions response missing the revision payload.
        Mock::given(method("GET"))
            .and(query_param("prop", "revisions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"pages": {"-1": {"title": "Interview:Broken", "missing": ""}}}
            })))
            .mount(&server)
            .await;

        let client = WikiClient::new(Url::parse(&server.uri()).unwrap()).unwrap();
        let config = SyncConfig {
            namespace: 7000,
            target_page: "JoJo_Wiki:Interviews".into(),
        };

        let err = sync(&client, &config, &SilentProgress)
            .await
            .expect_err("run must fail");
        assert!(matches!(err, WikidexError::Api { .. }));
    }
}
