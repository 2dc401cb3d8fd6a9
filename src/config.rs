//! Configuration model for copydesk.
//!
//! This module defines the Config struct that represents `.copydesk/config.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

use crate::error::{CopydeskError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides the configured API base URL.
pub const API_URL_ENV: &str = "COPYDESK_API_URL";

/// Configuration for a copydesk workspace.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name, used in status output and event details.
    #[serde(default = "default_project")]
    pub project: String,

    /// Base URL of the generation/scoring service.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Optional bearer token sent with API requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_auth_token: Option<String>,

    /// Minutes after which a request lock is considered stale.
    #[serde(default = "default_lock_stale_minutes")]
    pub lock_stale_minutes: u32,
}

fn default_project() -> String {
    "untitled".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_lock_stale_minutes() -> u32 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: default_project(),
            api_base_url: default_api_base_url(),
            api_auth_token: None,
            lock_stale_minutes: default_lock_stale_minutes(),
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            CopydeskError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| CopydeskError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            CopydeskError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return an error on invalid values.
    ///
    /// Validation rules:
    /// - `project` must be non-empty
    /// - `api_base_url` must be non-empty and start with `http://` or `https://`
    /// - `lock_stale_minutes` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.project.trim().is_empty() {
            return Err(CopydeskError::UserError(
                "config error: 'project' must not be empty".to_string(),
            ));
        }

        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(CopydeskError::UserError(
                "config error: 'api_base_url' must not be empty".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CopydeskError::UserError(format!(
                "config error: 'api_base_url' must start with http:// or https:// (got '{}')",
                url
            )));
        }

        if self.lock_stale_minutes == 0 {
            return Err(CopydeskError::UserError(
                "config error: 'lock_stale_minutes' must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// The API base URL with the environment override applied.
    ///
    /// `COPYDESK_API_URL` takes precedence over the configured value.
    /// A trailing slash is trimmed so endpoint paths can be appended directly.
    pub fn effective_api_base_url(&self) -> String {
        let url = std::env::var(API_URL_ENV).unwrap_or_else(|_| self.api_base_url.clone());
        url.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.project, "untitled");
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.lock_stale_minutes, 30);
        assert!(config.api_auth_token.is_none());
    }

    #[test]
    fn parse_minimal_yaml_uses_defaults() {
        let config = Config::from_yaml("project: acme\n").unwrap();
        assert_eq!(config.project, "acme");
        assert_eq!(config.api_base_url, "http://localhost:3000");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
project: acme
api_base_url: https://copy.example.com
api_auth_token: secret-token
lock_stale_minutes: 10
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.project, "acme");
        assert_eq!(config.api_base_url, "https://copy.example.com");
        assert_eq!(config.api_auth_token.as_deref(), Some("secret-token"));
        assert_eq!(config.lock_stale_minutes, 10);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let yaml = "project: acme\nfuture_feature: enabled\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.project, "acme");
    }

    #[test]
    fn empty_project_fails_validation() {
        let result = Config::from_yaml("project: \"\"\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("project"));
    }

    #[test]
    fn bad_base_url_fails_validation() {
        let result = Config::from_yaml("api_base_url: ftp://copy.example.com\n");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("api_base_url"));
    }

    #[test]
    fn zero_lock_stale_minutes_fails_validation() {
        let result = Config::from_yaml("lock_stale_minutes: 0\n");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("lock_stale_minutes")
        );
    }

    #[test]
    fn yaml_roundtrip() {
        let config = Config {
            project: "acme".to_string(),
            api_base_url: "https://copy.example.com".to_string(),
            api_auth_token: Some("tok".to_string()),
            lock_stale_minutes: 5,
        };
        let yaml = config.to_yaml().unwrap();
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.project, config.project);
        assert_eq!(parsed.api_base_url, config.api_base_url);
        assert_eq!(parsed.api_auth_token, config.api_auth_token);
        assert_eq!(parsed.lock_stale_minutes, config.lock_stale_minutes);
    }

    #[test]
    #[serial]
    fn env_override_takes_precedence() {
        let config = Config::default();

        unsafe { std::env::set_var(API_URL_ENV, "https://override.example.com/") };
        let url = config.effective_api_base_url();
        unsafe { std::env::remove_var(API_URL_ENV) };

        assert_eq!(url, "https://override.example.com");
    }

    #[test]
    #[serial]
    fn effective_url_trims_trailing_slash() {
        let config = Config {
            api_base_url: "http://localhost:3000/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.effective_api_base_url(), "http://localhost:3000");
    }
}
