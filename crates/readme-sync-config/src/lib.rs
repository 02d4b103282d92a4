//! Configuration management for readme-sync.
//!
//! Settings come from two layers:
//!
//! 1. an optional `readme-sync.toml`, given explicitly or auto-discovered in
//!    the current directory and its parents
//! 2. [`CliSettings`], filled from command-line flags or the GitHub Action
//!    `INPUT_*` environment variables, which take precedence
//!
//! [`Config::settings`] validates the merged values into [`SyncSettings`], the
//! only form the sync workflow accepts. Validation happens before any network
//! access, so a missing value never produces a half-finished run.
//!
//! ## Environment Variable Expansion
//!
//! `confluence.page_url`, `confluence.username` and `confluence.token` support
//! `${VAR}` and `${VAR:-default}`.
//!
//! ```toml
//! [confluence]
//! page_url = "https://example.atlassian.net/wiki/spaces/TEAM/pages/123456/Readme"
//! username = "bot@example.com"
//! token = "${CONFLUENCE_TOKEN}"
//!
//! [sync]
//! filepath = "README.md"
//! insert_start_text = "<p>readme-start</p>"
//! insert_end_text = "<p>readme-end</p>"
//! ```

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "readme-sync.toml";

/// Version message attached to page updates unless configured otherwise.
pub const DEFAULT_VERSION_MESSAGE: &str = "Page updated automatically by readme-sync";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the markdown file path.
    pub filepath: Option<PathBuf>,
    /// Override the Confluence page URL.
    pub page_url: Option<String>,
    /// Override the Confluence username.
    pub username: Option<String>,
    /// Override the Confluence API token.
    pub token: Option<String>,
    /// Override the start boundary marker.
    pub insert_start_text: Option<String>,
    /// Override the end boundary marker.
    pub insert_end_text: Option<String>,
    /// Override the page version message.
    pub version_message: Option<String>,
}

/// Application configuration as loaded, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence target and credentials.
    pub confluence: ConfluenceConfig,
    /// Sync source and boundary markers.
    pub sync: SyncConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[confluence]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfluenceConfig {
    /// URL of the page to update.
    pub page_url: Option<String>,
    /// Account email or username.
    pub username: Option<String>,
    /// API token.
    pub token: Option<String>,
}

/// `[sync]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Markdown file to publish. Relative paths resolve against the config file.
    pub filepath: Option<PathBuf>,
    /// Text marking the start of the managed region.
    pub insert_start_text: Option<String>,
    /// Text marking the end of the managed region.
    pub insert_end_text: Option<String>,
    /// Version message for page updates.
    pub version_message: Option<String>,
}

/// Location of a Confluence Cloud page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    /// Site root, e.g. `https://example.atlassian.net`.
    pub base_url: String,
    /// Numeric page ID.
    pub page_id: String,
}

impl PageLocation {
    /// Parse a page URL such as
    /// `https://example.atlassian.net/wiki/spaces/TEAM/pages/123456/Title`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the domain or page ID cannot be found.
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let (scheme, rest) = url
            .split_once("://")
            .filter(|(scheme, _)| matches!(*scheme, "http" | "https"))
            .ok_or_else(|| invalid_url(url, "must start with http:// or https://"))?;

        let domain = rest.split('/').next().unwrap_or_default();
        if domain.is_empty() || !rest.contains('/') {
            return Err(invalid_url(url, "failed to extract domain"));
        }

        let page_id = rest
            .split_once("/pages/")
            .map(|(_, tail)| {
                let end = tail
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(tail.len());
                (&tail[..end], &tail[end..])
            })
            .filter(|(id, tail)| {
                !id.is_empty() && (tail.is_empty() || tail.starts_with(['/', '?', '#']))
            })
            .map(|(id, _)| id)
            .ok_or_else(|| invalid_url(url, "failed to extract page id"))?;

        Ok(Self {
            base_url: format!("{scheme}://{domain}"),
            page_id: page_id.to_owned(),
        })
    }
}

fn invalid_url(url: &str, reason: &str) -> ConfigError {
    ConfigError::Validation(format!("confluence.page_url {reason}: {url}"))
}

/// Validated settings for one sync run. Every field is non-empty.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Markdown file to publish.
    pub markdown_path: PathBuf,
    /// Target page.
    pub page: PageLocation,
    /// Confluence username.
    pub username: String,
    /// Confluence API token.
    pub token: String,
    /// Start boundary marker.
    pub insert_start_text: String,
    /// End boundary marker.
    pub insert_end_text: String,
    /// Version message for the update.
    pub version_message: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_TOKEN`} not set").
        message: String,
    },
}

/// Require an optional string field to be present and non-empty.
fn require<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ConfigError> {
    match value {
        None => Err(ConfigError::Validation(format!("missing value for {field}"))),
        Some("") => Err(ConfigError::Validation(format!("{field} cannot be empty"))),
        Some(value) => Ok(value),
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `readme-sync.toml` in current directory and parents,
    /// falling back to an empty configuration when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Validate the merged configuration into run settings.
    ///
    /// Fields are checked in a fixed order and the first missing one is
    /// reported by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a field is missing, empty or invalid.
    pub fn settings(&self) -> Result<SyncSettings, ConfigError> {
        let filepath = self
            .sync
            .filepath
            .as_deref()
            .map(|path| path.to_str().unwrap_or("?"));
        require(filepath, "sync.filepath")?;
        let page_url = require(self.confluence.page_url.as_deref(), "confluence.page_url")?;
        let username = require(self.confluence.username.as_deref(), "confluence.username")?;
        let token = require(self.confluence.token.as_deref(), "confluence.token")?;
        let start = require(self.sync.insert_start_text.as_deref(), "sync.insert_start_text")?;
        let end = require(self.sync.insert_end_text.as_deref(), "sync.insert_end_text")?;

        let version_message = match self.sync.version_message.as_deref() {
            None | Some("") => DEFAULT_VERSION_MESSAGE,
            Some(message) => message,
        };

        Ok(SyncSettings {
            markdown_path: self.sync.filepath.clone().unwrap_or_default(),
            page: PageLocation::from_url(page_url)?,
            username: username.to_owned(),
            token: token.to_owned(),
            insert_start_text: start.to_owned(),
            insert_end_text: end.to_owned(),
            version_message: version_message.to_owned(),
        })
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(filepath) = &settings.filepath {
            self.sync.filepath = Some(filepath.clone());
        }
        if let Some(page_url) = &settings.page_url {
            self.confluence.page_url = Some(page_url.clone());
        }
        if let Some(username) = &settings.username {
            self.confluence.username = Some(username.clone());
        }
        if let Some(token) = &settings.token {
            self.confluence.token = Some(token.clone());
        }
        if let Some(start) = &settings.insert_start_text {
            self.sync.insert_start_text = Some(start.clone());
        }
        if let Some(end) = &settings.insert_end_text {
            self.sync.insert_end_text = Some(end.clone());
        }
        if let Some(message) = &settings.version_message {
            self.sync.version_message = Some(message.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let confluence = &mut self.confluence;
        expand::expand_field(&mut confluence.page_url, "confluence.page_url")?;
        expand::expand_field(&mut confluence.username, "confluence.username")?;
        expand::expand_field(&mut confluence.token, "confluence.token")?;
        Ok(())
    }

    /// Resolve relative paths against the config file directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        if let Some(filepath) = &self.sync.filepath
            && filepath.is_relative()
            && !filepath.as_os_str().is_empty()
        {
            self.sync.filepath = Some(config_dir.join(filepath));
        }
    }
}
