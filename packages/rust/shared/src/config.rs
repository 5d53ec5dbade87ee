//! Application configuration for wikidex.
//!
//! User config lives at `~/.wikidex/wikidex.toml`. Credentials never live in
//! the file — the config names the environment variables that hold them, and
//! everything is resolved once at startup into explicit values passed down.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, WikidexError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "wikidex.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".wikidex";

/// Env var consulted for the API endpoint when the config leaves it unset.
const API_URL_ENV: &str = "MEDIAWIKI_API_URL";

// ---------------------------------------------------------------------------
// Config structs (matching wikidex.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Wiki endpoint and credential sources.
    #[serde(default)]
    pub wiki: WikiConfig,

    /// Sync run settings.
    #[serde(default)]
    pub sync: SyncDefaults,
}

/// `[wiki]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// MediaWiki `api.php` endpoint. Falls back to `MEDIAWIKI_API_URL`.
    #[serde(default)]
    pub api_url: String,

    /// Name of the env var holding the bot username.
    #[serde(default = "default_username_env")]
    pub username_env: String,

    /// Name of the env var holding the bot password.
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            username_env: default_username_env(),
            password_env: default_password_env(),
        }
    }
}

fn default_username_env() -> String {
    "MEDIAWIKI_USERNAME".into()
}
fn default_password_env() -> String {
    "MEDIAWIKI_PASSWORD".into()
}

/// `[sync]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncDefaults {
    /// Numeric namespace holding the interview pages.
    #[serde(default = "default_namespace")]
    pub namespace: u32,

    /// Page the aggregated JSON catalogue is written to.
    #[serde(default = "default_target_page")]
    pub target_page: String,
}

impl Default for SyncDefaults {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            target_page: default_target_page(),
        }
    }
}

fn default_namespace() -> u32 {
    7000
}
fn default_target_page() -> String {
    "JoJo_Wiki:Interviews".into()
}

// ---------------------------------------------------------------------------
// Sync config (runtime, resolved from config)
// ---------------------------------------------------------------------------

/// Runtime sync configuration handed to the orchestrator.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Namespace to enumerate.
    pub namespace: u32,
    /// Target page for the JSON catalogue.
    pub target_page: String,
}

impl From<&AppConfig> for SyncConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            namespace: config.sync.namespace,
            target_page: config.sync.target_page.clone(),
        }
    }
}

/// Resolved bot credentials. Only ever constructed from env vars.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never echo the password, even in debug logs.
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.wikidex/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WikidexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.wikidex/wikidex.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| WikidexError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| WikidexError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| WikidexError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| WikidexError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| WikidexError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Resolve the API endpoint: config value first, then `MEDIAWIKI_API_URL`.
pub fn resolve_api_url(config: &AppConfig) -> Result<Url> {
    let raw = if config.wiki.api_url.is_empty() {
        std::env::var(API_URL_ENV).map_err(|_| {
            WikidexError::config(format!(
                "no API endpoint configured. Set [wiki].api_url in wikidex.toml \
                 or the {API_URL_ENV} environment variable."
            ))
        })?
    } else {
        config.wiki.api_url.clone()
    };

    Url::parse(&raw).map_err(|e| WikidexError::config(format!("invalid API URL '{raw}': {e}")))
}

/// Resolve bot credentials from the env vars named by the config.
pub fn resolve_credentials(config: &AppConfig) -> Result<Credentials> {
    let username = require_env(&config.wiki.username_env)?;
    let password = require_env(&config.wiki.password_env)?;
    Ok(Credentials { username, password })
}

fn require_env(var_name: &str) -> Result<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(WikidexError::config(format!(
            "credential not found. Set the {var_name} environment variable."
        ))),
    }
}
