//! Serde models for the MediaWiki API responses we consume.
//!
//! Only the fields this tool reads are modeled; everything else in the
//! responses is ignored. `query.pages` is keyed by page id, so it maps to a
//! `HashMap` rather than a list.

use std::collections::HashMap;

use serde::Deserialize;

/// `action=query&meta=tokens` response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub query: TokenQuery,
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub tokens: Tokens,
}

#[derive(Debug, Default, Deserialize)]
pub struct Tokens {
    #[serde(rename = "logintoken")]
    pub login_token: Option<String>,
    #[serde(rename = "csrftoken")]
    pub csrf_token: Option<String>,
}

/// `action=login` response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub login: LoginOutcome,
}

#[derive(Debug, Deserialize)]
pub struct LoginOutcome {
    pub result: String,
    pub reason: Option<String>,
}

/// `list=allpages` response.
#[derive(Debug, Deserialize)]
pub struct AllPagesResponse {
    pub query: AllPagesQuery,
    /// Continuation token — present when the namespace exceeds one batch.
    #[serde(rename = "continue")]
    pub cont: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct AllPagesQuery {
    pub allpages: Vec<TitledEntry>,
}

/// Any API object we only read a `title` out of.
#[derive(Debug, Deserialize)]
pub struct TitledEntry {
    pub title: String,
}

/// `prop=revisions&rvprop=content` response.
#[derive(Debug, Deserialize)]
pub struct RevisionsResponse {
    pub query: RevisionsQuery,
}

#[derive(Debug, Deserialize)]
pub struct RevisionsQuery {
    pub pages: HashMap<String, RevisionsPage>,
}

#[derive(Debug, Deserialize)]
pub struct RevisionsPage {
    pub title: Option<String>,
    pub revisions: Option<Vec<Revision>>,
}

#[derive(Debug, Deserialize)]
pub struct Revision {
    /// Raw wikitext; the legacy API format keys content as `*`.
    #[serde(rename = "*")]
    pub content: String,
}

/// `prop=categories` response.
#[derive(Debug, Deserialize)]
pub struct CategoriesResponse {
    pub query: CategoriesQuery,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    pub pages: HashMap<String, CategoriesPage>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesPage {
    /// Absent on pages with no categories.
    pub categories: Option<Vec<TitledEntry>>,
}

/// `action=edit` response.
#[derive(Debug, Deserialize)]
pub struct EditResponse {
    pub edit: Option<EditOutcome>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct EditOutcome {
    pub result: String,
}

/// The API's own error envelope (`{"error": {"code", "info"}}`).
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub info: String,
}
