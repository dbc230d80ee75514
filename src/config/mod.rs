//! Configuration (layered: code > env > defaults).

use std::path::PathBuf;
use std::time::Duration;

use crate::auth::identity::DEFAULT_IDENTITY_BASE_URL;
use crate::auth::SessionStoreConfig;
use crate::client::dispatcher::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use crate::error::{LobbyError, Result};

/// Settings for a [`crate::client::LobbyClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyConfig {
    /// Resource service root, e.g. `http://localhost:5141/api`.
    pub api_base_url: String,
    /// Identity service root, e.g. `http://localhost:5117`.
    pub identity_base_url: String,
    /// Where the file session store keeps `session.toml`.
    pub session_dir: PathBuf,
    pub request_timeout: Duration,
    /// Bound on the refresh call. `None` waits as long as the identity
    /// service takes.
    pub refresh_timeout: Option<Duration>,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LobbyConfig {
    pub fn new() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_string(),
            session_dir: SessionStoreConfig::default_dir(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            refresh_timeout: None,
        }
    }

    /// Load from environment variables (and `.env` when present).
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `LOBBY_API_BASE_URL` | `api_base_url` |
    /// | `LOBBY_IDENTITY_BASE_URL` | `identity_base_url` |
    /// | `LOBBY_SESSION_DIR` | `session_dir` |
    /// | `LOBBY_REQUEST_TIMEOUT_SECS` | `request_timeout` |
    /// | `LOBBY_REFRESH_TIMEOUT_SECS` | `refresh_timeout` |
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::new();
        if let Some(url) = lookup("LOBBY_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Some(url) = lookup("LOBBY_IDENTITY_BASE_URL") {
            config.identity_base_url = url;
        }
        if let Some(dir) = lookup("LOBBY_SESSION_DIR") {
            config.session_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("LOBBY_REQUEST_TIMEOUT_SECS") {
            config.request_timeout = parse_secs("LOBBY_REQUEST_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("LOBBY_REFRESH_TIMEOUT_SECS") {
            config.refresh_timeout = Some(parse_secs("LOBBY_REFRESH_TIMEOUT_SECS", &raw)?);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_identity_base_url(mut self, url: impl Into<String>) -> Self {
        self.identity_base_url = url.into();
        self
    }

    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = dir.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_refresh_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("api_base_url", &self.api_base_url),
            ("identity_base_url", &self.identity_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(LobbyError::Configuration(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }
        if self.request_timeout.is_zero() {
            return Err(LobbyError::Configuration(
                "request_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| LobbyError::Configuration(format!("{key} must be whole seconds, got '{raw}'")))
}
