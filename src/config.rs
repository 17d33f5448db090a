//! Top-level application configuration.
//!
//! Configuration is stored in `config.yaml` under the Artify home directory
//! and includes:
//! - Gallery API base URL
//! - Session credentials handed over by the identity provider
//! - Request timeout
//! - Search debounce and mode

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifyError, Result};
use crate::session::{Session, Viewer};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the gallery API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Session credentials
    #[serde(default, skip_serializing_if = "AuthConfig::is_empty")]
    pub auth: AuthConfig,

    /// Remote request timeout in seconds (default: 10)
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout: u64,

    /// Search configuration
    #[serde(default, skip_serializing_if = "SearchConfig::is_default")]
    pub search: SearchConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_remote_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            auth: AuthConfig::default(),
            remote_timeout: default_remote_timeout(),
            search: SearchConfig::default(),
        }
    }
}

/// Credentials copied from the identity provider's session.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_email: Option<String>,
}

impl AuthConfig {
    pub fn is_empty(&self) -> bool {
        self.token.is_none()
            && self.viewer_id.is_none()
            && self.viewer_name.is_none()
            && self.viewer_email.is_none()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("viewer_id", &self.viewer_id)
            .field("viewer_name", &self.viewer_name)
            .field("viewer_email", &self.viewer_email)
            .finish()
    }
}

/// Where search queries are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Re-query the API for every search
    #[default]
    Remote,
    /// Filter the already loaded collection
    Local,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Remote => write!(f, "remote"),
            SearchMode::Local => write!(f, "local"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = ArtifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(SearchMode::Remote),
            "local" => Ok(SearchMode::Local),
            _ => Err(ArtifyError::Config(format!(
                "unknown search mode '{}', expected 'remote' or 'local'",
                s
            ))),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last input change before a query runs
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default)]
    pub mode: SearchMode,
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            mode: SearchMode::default(),
        }
    }
}

impl SearchConfig {
    pub fn is_default(&self) -> bool {
        self.debounce_ms == default_debounce_ms() && self.mode == SearchMode::default()
    }
}

/// Directory holding `config.yaml`.
///
/// `ARTIFY_HOME` wins; otherwise the platform config directory, falling back
/// to `.artify` in the working directory when no home directory is known.
pub fn artify_root() -> PathBuf {
    if let Ok(home) = env::var("ARTIFY_HOME")
        && !home.is_empty()
    {
        return PathBuf::from(home);
    }

    directories::ProjectDirs::from("", "", "artify")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".artify"))
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        artify_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            ArtifyError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// API base URL from `ARTIFY_API_URL` or the config file
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var("ARTIFY_API_URL")
            && !url.is_empty()
        {
            return url;
        }
        self.api_url.clone()
    }

    /// Bearer token from `ARTIFY_TOKEN` or the config file
    pub fn token(&self) -> Option<String> {
        if let Ok(token) = env::var("ARTIFY_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }
        self.auth.token.clone()
    }

    /// Build the session the core will run under.
    ///
    /// The viewer id falls back to the email, since the gallery keys
    /// ownership by email.
    pub fn session(&self) -> Session {
        let viewer_id = self
            .auth
            .viewer_id
            .clone()
            .or_else(|| self.auth.viewer_email.clone());

        let viewer = viewer_id.map(|id| Viewer {
            id,
            name: self.auth.viewer_name.clone(),
            email: self.auth.viewer_email.clone(),
        });

        Session::from_parts(viewer, self.token())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout.max(1))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}
