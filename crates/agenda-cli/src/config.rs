//! Configuration
//!
//! Loaded from a TOML file when one is given; every field has a default so
//! an empty file (or no file) is a valid configuration. The report API key
//! itself is never stored here, only the name of the variable holding it.

use crate::logging::LogFormat;
use agenda_report::{GeminiConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_SAMPLE_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the file
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },
}

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    /// Directory holding the request document
    pub data_dir: PathBuf,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Replacement directory catalog (TOML)
    pub directory_path: Option<PathBuf>,
    /// Summary generator settings
    pub report: ReportConfig,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_level: "warn".to_string(),
            log_format: LogFormat::default(),
            directory_path: None,
            report: ReportConfig::default(),
        }
    }
}

impl AgendaConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// `toml::de::Error` on malformed input.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    /// `ConfigError::Io` or `ConfigError::Parse`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given, defaults otherwise
    ///
    /// # Errors
    /// Same as [`AgendaConfig::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// With data directory
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

/// Summary generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Model name
    pub model: String,
    /// API base URL
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Most recent records included in the prompt
    pub sample_limit: usize,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            api_key_env: "API_KEY".to_string(),
        }
    }
}

impl ReportConfig {
    /// Client settings for `api_key`
    #[must_use]
    pub fn gemini(&self, api_key: impl Into<String>) -> GeminiConfig {
        GeminiConfig::new(api_key)
            .with_model(&self.model)
            .with_endpoint(&self.endpoint)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Read the API key from the configured variable; blank counts as unset
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(AgendaConfig::from_toml_str("").unwrap(), AgendaConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AgendaConfig::from_toml_str(
            r#"
            data_dir = "/var/lib/cesfam"
            log_format = "json"

            [report]
            sample_limit = 20
            api_key_env = "GEMINI_KEY"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/cesfam"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.report.sample_limit, 20);
        assert_eq!(config.report.api_key_env, "GEMINI_KEY");
        assert_eq!(config.report.model, DEFAULT_MODEL);
    }

    #[test]
    fn gemini_settings_follow_config() {
        let report = ReportConfig {
            timeout_secs: 5,
            ..ReportConfig::default()
        };
        let gemini = report.gemini("key");
        assert_eq!(gemini.timeout, Duration::from_secs(5));
        assert_eq!(gemini.model, DEFAULT_MODEL);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AgendaConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
