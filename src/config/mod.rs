//! Connection configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::ConfigError;

/// Default Scaleway API endpoint
pub const DEFAULT_API_URL: &str = "https://api.scaleway.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration of one Scaleway connection
///
/// Loaded from YAML and/or the standard `SCW_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Access key ID (`SCW...`), informational for the API
    #[serde(default)]
    pub access_key: Option<String>,

    /// Secret key sent as `X-Auth-Token`
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Default organization applied when a query has no qual on it
    #[serde(default)]
    pub organization_id: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            secret_key: None,
            organization_id: None,
            project_id: None,
            api_url: default_api_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConnectionConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read connection config '{}'", path))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse connection config '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from the process environment only
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Layer `SCW_*` environment variables over this configuration
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Layer values from an arbitrary lookup over this configuration
    ///
    /// Empty values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = get("SCW_ACCESS_KEY") {
            self.access_key = Some(v);
        }
        if let Some(v) = get("SCW_SECRET_KEY") {
            self.secret_key = Some(v);
        }
        if let Some(v) = get("SCW_DEFAULT_ORGANIZATION_ID") {
            self.organization_id = Some(v);
        }
        if let Some(v) = get("SCW_DEFAULT_PROJECT_ID") {
            self.project_id = Some(v);
        }
        if let Some(v) = get("SCW_API_URL") {
            self.api_url = v;
        }

        self.validate()?;
        Ok(self)
    }

    /// The default organization, if one is set and non-empty
    pub fn default_organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref().filter(|s| !s.is_empty())
    }

    /// The secret key, if one is set and non-empty
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref().filter(|s| !s.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_url".to_string(),
                value: self.api_url.clone(),
                message: "must be an http(s) URL".to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                value: "0".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
