//! Client configuration.
//!
//! Configuration can be loaded from:
//! - a TOML file (`$TERMSTD_CONFIG`, or `<config_dir>/termstd/client.toml`)
//! - environment variables (`TERMSTD_*` prefixed)
//!
//! ```toml
//! [client]
//! base_url = "http://localhost:8000"
//! timeout_seconds = 120
//!
//! [client.endpoints]
//! fin-std = "/api/v2/fin-std"
//! ```

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use termstd_core::{defaults, Workflow};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid"));

fn default_base_url() -> String {
    defaults::SERVICE_URL.to_string()
}

fn default_timeout() -> u64 {
    defaults::TIMEOUT_SECS
}

/// Transport settings for the processing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the processing service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Endpoint path overrides keyed by workflow slug.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub endpoints: BTreeMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            endpoints: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Get the config file path.
    ///
    /// Returns `$TERMSTD_CONFIG` when set, otherwise
    /// `<config_dir>/termstd/client.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Ok(path) = env::var("TERMSTD_CONFIG") {
            return PathBuf::from(path);
        }
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push("termstd");
        path.push("client.toml");
        path
    }

    /// Load configuration from the config file, falling back to environment
    /// variables when it does not exist.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        let config = if path.exists() {
            info!("Loading client config from: {}", path.display());
            Self::from_file(&path)?
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            Self::from_env()
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse TOML content with `${VAR}` substitution.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        #[derive(Deserialize)]
        struct TomlRoot {
            #[serde(default)]
            client: Option<ClientConfig>,
        }

        let content = Self::substitute_env_vars(content);
        let root: TomlRoot = toml::from_str(&content)?;
        Ok(root.client.unwrap_or_default())
    }

    /// Load configuration from environment variables.
    ///
    /// - `TERMSTD_BASE_URL`: service base URL
    /// - `TERMSTD_TIMEOUT`: request timeout in seconds
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: lookup("TERMSTD_BASE_URL").unwrap_or_else(default_base_url),
            timeout_seconds: lookup("TERMSTD_TIMEOUT")
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_timeout),
            endpoints: BTreeMap::new(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "timeout_seconds must be greater than zero".to_string(),
            ));
        }

        for (slug, path) in &self.endpoints {
            if slug.parse::<Workflow>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "endpoint override for unknown workflow: {}",
                    slug
                )));
            }
            if !path.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "endpoint override for {} must start with '/', got: {}",
                    slug, path
                )));
            }
        }

        Ok(())
    }

    /// Endpoint path for a workflow, honoring overrides.
    pub fn endpoint_for(&self, workflow: Workflow) -> String {
        self.endpoints
            .iter()
            .find(|(slug, _)| slug.parse::<Workflow>().ok() == Some(workflow))
            .map(|(_, path)| path.clone())
            .unwrap_or_else(|| workflow.endpoint_path().to_string())
    }

    /// Full URL for an endpoint path.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }

    /// Substitute `${VAR}` placeholders; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }
}
