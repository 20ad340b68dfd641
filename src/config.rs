//! Configuration Management
//!
//! Handles persistent configuration storage for fastly-syslog.

use crate::error::{Error, Result};
use crate::fastly::auth::ApiToken;
use crate::fastly::client::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the API endpoint
pub const ENDPOINT_ENV: &str = "FASTLY_API_URL";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// API endpoint, for staging or proxies
    #[serde(default)]
    pub endpoint: Option<String>,
    /// API token; the environment variable takes precedence
    #[serde(default)]
    pub api_token: Option<String>,
    /// Last used service ID
    #[serde(default)]
    pub service_id: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fastly-syslog").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file.
    /// Missing or unreadable files yield the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective endpoint (CLI > env > config > production)
    pub fn effective_endpoint(&self, cli: Option<&str>) -> String {
        let env = std::env::var(ENDPOINT_ENV).ok();
        pick(cli, env.as_deref(), self.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string()
    }

    /// Get effective API token (CLI > env > config)
    pub fn effective_token(&self, cli: Option<&str>) -> Result<ApiToken> {
        let explicit = |v: Option<&str>| v.and_then(|t| ApiToken::new(t).ok());
        explicit(cli)
            .or_else(ApiToken::from_env)
            .or_else(|| explicit(self.api_token.as_deref()))
            .ok_or(Error::MissingApiToken)
    }

    /// Get effective service ID (CLI > config)
    pub fn effective_service_id(&self, cli: Option<&str>) -> Option<String> {
        pick(cli, None, self.service_id.as_deref()).map(str::to_string)
    }

    /// Remember the service and save
    pub fn set_service_id(&mut self, service_id: &str) -> anyhow::Result<()> {
        self.service_id = Some(service_id.to_string());
        self.save()
    }
}

/// First non-blank value in precedence order
fn pick<'a>(cli: Option<&'a str>, env: Option<&'a str>, file: Option<&'a str>) -> Option<&'a str> {
    [cli, env, file]
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
}
