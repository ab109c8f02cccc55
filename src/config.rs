//! Configuration types for pokeapi-csv

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, path::PathBuf, time::Duration};

/// Remote API settings (base URL, page size, language, timeouts)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API; a missing trailing slash is added (default: "https://pokeapi.co/api/v2/")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Page size requested from each list endpoint (default: 2000)
    ///
    /// Only the first page is fetched, so this must be at least the total
    /// number of resources for a complete export.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Language used for flavor text, effects and localized names (default: "en")
    #[serde(default = "default_language")]
    pub language: String,

    /// Timeout applied to every request (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            limit: default_limit(),
            language: default_language(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the CSV files are written to (default: "./data")
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Main configuration
///
/// Every field has a default, so an empty JSON object is a valid config file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load a configuration from a JSON file
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read config file {}: {}", path.display(), e),
            key: None,
        })?;

        serde_json::from_str(&content).map_err(|e| Error::Config {
            message: format!("failed to parse config file {}: {}", path.display(), e),
            key: None,
        })
    }

    /// Check the configuration for values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.api.limit == 0 {
            return Err(Error::config("api.limit", "limit must be greater than zero"));
        }

        if self.api.language.trim().is_empty() {
            return Err(Error::config("api.language", "language must not be empty"));
        }

        if self.api.request_timeout.is_zero() {
            return Err(Error::config(
                "api.request_timeout",
                "request timeout must be greater than zero",
            ));
        }

        let base = url::Url::parse(&self.api.base_url).map_err(|e| {
            Error::config(
                "api.base_url",
                format!("invalid base URL '{}': {}", self.api.base_url, e),
            )
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::config(
                "api.base_url",
                format!("'{}' cannot be used as a base URL", self.api.base_url),
            ));
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2/".to_string()
}

fn default_limit() -> usize {
    2000
}

fn default_language() -> String {
    "en".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("pokeapi-csv/{}", env!("CARGO_PKG_VERSION"))
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./data")
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
