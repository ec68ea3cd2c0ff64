//! Configuration management.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults; the provider credential supports `${ENV_VAR}` references resolved
//! once at load time and injected into the provider client at construction.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Hard limit on accepted uploads: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Captioning provider settings
    pub provider: ProviderConfig,

    /// Upload limits
    pub limits: LimitsConfig,
}

/// Settings for the external captioning provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the inference endpoint (model name is appended)
    pub endpoint: String,
    /// API key; `${ENV_VAR}` references are resolved at load time
    pub api_key: String,
    /// Model identifier
    pub model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co/models".to_string(),
            api_key: "${HF_API_KEY}".to_string(),
            model: "Salesforce/blip-image-captioning-base".to_string(),
        }
    }
}

impl ProviderConfig {
    /// Full request URL for the configured model.
    pub fn url(&self) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), self.model)
    }

    /// Resolve the configured API key, expanding `${ENV_VAR}` references.
    ///
    /// Returns `None` when the key is empty or references an unset variable;
    /// the provider client treats that as a missing credential.
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_env_var(&self.api_key)
    }
}

/// Resource limits for uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories, falling back to
    /// `~/.glimpse/config.toml` if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "glimpse", "glimpse")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".glimpse").join("config.toml")
            })
    }

    /// Check configuration values for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.endpoint must not be empty".to_string(),
            ));
        }
        if self.provider.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "provider.model must not be empty".to_string(),
            ));
        }
        if self.limits.max_upload_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.limits.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.provider.endpoint.contains("huggingface"));
        config.validate().unwrap();
    }

    #[test]
    fn test_provider_url_joins_model() {
        let config = ProviderConfig::default();
        assert_eq!(
            config.url(),
            "https://api-inference.huggingface.co/models/Salesforce/blip-image-captioning-base"
        );
    }

    #[test]
    fn test_provider_url_trims_trailing_slash() {
        let config = ProviderConfig {
            endpoint: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        assert!(config.url().starts_with("http://localhost:8080/Salesforce"));
    }

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[limits]\nmax_upload_bytes = 2048\n\n[provider]\napi_key = \"test-key\""
        )
        .unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.limits.max_upload_bytes, 2048);
        assert_eq!(config.provider.api_key, "test-key");
        // Unspecified fields keep their defaults
        assert!(config.provider.endpoint.contains("huggingface"));
    }

    #[test]
    fn test_load_from_rejects_zero_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[limits]\nmax_upload_bytes = 0").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
