//! Authenticated MediaWiki API client.
//!
//! One [`WikiClient`] wraps a cookie-holding reqwest client pointed at a
//! single `api.php` endpoint. [`WikiClient::login`] establishes the session
//! cookies; every later call rides on them. All calls are sequential — the
//! wiki is small and the API is rate-limited, so there is nothing to gain
//! from parallel fetches.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use wikidex_shared::{Credentials, Result, WikidexError};

use crate::api::{
    AllPagesResponse, CategoriesResponse, EditResponse, LoginResponse, RevisionsResponse,
    TokenResponse,
};

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("wikidex/", env!("CARGO_PKG_VERSION"));

/// MediaWiki API client. Session state lives in the cookie jar.
pub struct WikiClient {
    http: Client,
    api_url: Url,
}

impl WikiClient {
    /// Create a client for the given `api.php` endpoint.
    pub fn new(api_url: Url) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WikidexError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, api_url })
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    /// Log in with the bot credentials.
    ///
    /// Fetches a login token, then exchanges credentials + token for session
    /// cookies. Anything but `result == "Success"` is an auth error and the
    /// caller must not proceed with further operations.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let token = self.fetch_login_token().await?;

        let response: LoginResponse = self
            .post_form(&[
                ("action", "login"),
                ("lgname", &credentials.username),
                ("lgpassword", &credentials.password),
                ("lgtoken", &token),
                ("format", "json"),
            ])
            .await?;

        if response.login.result == "Success" {
            info!(user = %credentials.username, "logged in");
            Ok(())
        } else {
            Err(WikidexError::auth(format!(
                "login failed: {}{}",
                response.login.result,
                response
                    .login
                    .reason
                    .map(|r| format!(" ({r})"))
                    .unwrap_or_default()
            )))
        }
    }

    async fn fetch_login_token(&self) -> Result<String> {
        let response: TokenResponse = self
            .get_query(&[
                ("action", "query"),
                ("meta", "tokens"),
                ("type", "login"),
                ("format", "json"),
            ])
            .await?;

        response
            .query
            .tokens
            .login_token
            .ok_or_else(|| WikidexError::api("token response carried no login token"))
    }

    /// Fetch a fresh csrf token for a write operation.
    pub async fn fetch_csrf_token(&self) -> Result<String> {
        let response: TokenResponse = self
            .get_query(&[
                ("action", "query"),
                ("meta", "tokens"),
                ("type", "csrf"),
                ("format", "json"),
            ])
            .await?;

        response
            .query
            .tokens
            .csrf_token
            .ok_or_else(|| WikidexError::api("token response carried no csrf token"))
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Enumerate all page titles in a namespace.
    ///
    /// A single `aplimit=max` request only. If the API hands back a
    /// continuation token the remainder is skipped — replicated as a known
    /// limitation and surfaced with a warning instead of silently.
    pub async fn list_namespace_pages(&self, namespace: u32) -> Result<Vec<String>> {
        let namespace = namespace.to_string();
        let response: AllPagesResponse = self
            .get_query(&[
                ("action", "query"),
                ("list", "allpages"),
                ("apnamespace", &namespace),
                ("aplimit", "max"),
                ("format", "json"),
            ])
            .await?;

        if response.cont.is_some() {
            warn!(
                %namespace,
                "allpages returned a continuation token; titles beyond the first batch are skipped"
            );
        }

        Ok(response
            .query
            .allpages
            .into_iter()
            .map(|p| p.title)
            .collect())
    }

    /// Fetch the latest revision's raw wikitext for an exact title.
    ///
    /// An unexpected response shape (no page, no revisions) is an explicit
    /// `Api` error — fatal for the run, but clearly reported.
    pub async fn fetch_page_content(&self, title: &str) -> Result<String> {
        debug!(title, "fetching page content");

        let response: RevisionsResponse = self
            .get_query(&[
                ("action", "query"),
                ("prop", "revisions"),
                ("rvprop", "content"),
                ("titles", title),
                ("format", "json"),
            ])
            .await?;

        let page = response
            .query
            .pages
            .into_values()
            .next()
            .ok_or_else(|| WikidexError::api(format!("no page in revisions response for '{title}'")))?;

        let revision = page
            .revisions
            .and_then(|revisions| revisions.into_iter().next())
            .ok_or_else(|| WikidexError::api(format!("no revisions for '{title}'")))?;

        Ok(revision.content)
    }

    /// Fetch a page's raw category titles (`Category:`-prefixed).
    ///
    /// A page with no categories yields an empty list, not an error.
    pub async fn fetch_categories(&self, title: &str) -> Result<Vec<String>> {
        debug!(title, "fetching categories");

        let response: CategoriesResponse = self
            .get_query(&[
                ("action", "query"),
                ("prop", "categories"),
                ("titles", title),
                ("cllimit", "max"),
                ("format", "json"),
            ])
            .await?;

        let page = response
            .query
            .pages
            .into_values()
            .next()
            .ok_or_else(|| WikidexError::api(format!("no page in categories response for '{title}'")))?;

        Ok(page
            .categories
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.title)
            .collect())
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Overwrite `title` with `text`, declaring its content model.
    ///
    /// Obtains a fresh csrf token per edit. No retry, no read-back
    /// verification — the API's `edit.result` field is the only signal.
    pub async fn edit_page(&self, title: &str, text: &str, content_model: &str) -> Result<()> {
        let token = self.fetch_csrf_token().await?;

        let response: EditResponse = self
            .post_form(&[
                ("action", "edit"),
                ("title", title),
                ("contentmodel", content_model),
                ("text", text),
                ("token", &token),
                ("format", "json"),
            ])
            .await?;

        match response.edit {
            Some(outcome) if outcome.result == "Success" => {
                info!(title, "page updated");
                Ok(())
            }
            Some(outcome) => Err(WikidexError::Edit(format!(
                "edit of '{title}' refused: {}",
                outcome.result
            ))),
            None => {
                let detail = response
                    .error
                    .map(|e| format!("{}: {}", e.code, e.info))
                    .unwrap_or_else(|| "no edit result in response".into());
                Err(WikidexError::Edit(format!("edit of '{title}' failed: {detail}")))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Transport helpers
    // -----------------------------------------------------------------------

    async fn get_query<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        let response = self
            .http
            .get(self.api_url.clone())
            .query(params)
            .send()
            .await
            .map_err(|e| WikidexError::Network(format!("GET {}: {e}", self.api_url)))?;

        self.decode(response).await
    }

    async fn post_form<T: DeserializeOwned>(&self, form: &[(&str, &str)]) -> Result<T> {
        let response = self
            .http
            .post(self.api_url.clone())
            .form(form)
            .send()
            .await
            .map_err(|e| WikidexError::Network(format!("POST {}: {e}", self.api_url)))?;

        self.decode(response).await
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(WikidexError::Network(format!(
                "{}: HTTP {status}",
                self.api_url
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WikidexError::api(format!("unexpected response shape: {e}")))
    }
}
