//! Client configuration loading and types

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable pointing at a config file
pub const CONFIG_ENV: &str = "JOBBOARD_CONFIG";

/// Origin used when no local proxy is configured
pub const DEFAULT_LOCAL_ORIGIN: &str = "http://localhost:3000";

/// Public backend used as the last-resort fallback
pub const DEFAULT_REMOTE_ORIGIN: &str = "https://api.jobboard.vn";

/// Per-attempt timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 40_000;

/// Retries after the first attempt
pub const DEFAULT_RETRIES: u32 = 3;

/// Settings shared by every loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the local proxy serving `/api/...`
    #[serde(default = "default_local_origin")]
    pub local_origin: String,
    /// Base URL hit directly once local attempts are exhausted
    #[serde(default = "default_remote_origin")]
    pub remote_origin: String,
    /// Per-attempt timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Retries after the first attempt
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Bearer token for admin endpoints
    #[serde(default, skip_serializing)]
    pub admin_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            local_origin: default_local_origin(),
            remote_origin: default_remote_origin(),
            timeout_ms: default_timeout_ms(),
            retries: default_retries(),
            admin_token: None,
        }
    }
}

fn default_local_origin() -> String {
    DEFAULT_LOCAL_ORIGIN.to_string()
}

fn default_remote_origin() -> String {
    DEFAULT_REMOTE_ORIGIN.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

impl ClientConfig {
    /// Per-attempt timeout as a `Duration`
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML for this type.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from default paths or use defaults, then apply environment overrides
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be read or parsed
    pub fn load_default() -> Result<Self> {
        let config = if let Ok(path) = std::env::var(CONFIG_ENV) {
            Self::load(&PathBuf::from(path))?
        } else {
            let paths = [
                Some(PathBuf::from("jobboard.toml")),
                dirs::config_dir().map(|p| p.join("jobboard/jobboard.toml")),
            ];

            match paths.into_iter().flatten().find(|p| p.exists()) {
                Some(path) => Self::load(&path)?,
                None => {
                    tracing::debug!("no config file found, using defaults");
                    Self::default()
                }
            }
        };

        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Defaults overlaid with the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Overlay `JOBBOARD_*` variables read through `lookup`
    ///
    /// Unparseable numbers are ignored with a warning.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(origin) = non_empty("JOBBOARD_LOCAL_ORIGIN") {
            self.local_origin = origin;
        }
        if let Some(origin) = non_empty("JOBBOARD_REMOTE_ORIGIN") {
            self.remote_origin = origin;
        }
        if let Some(raw) = non_empty("JOBBOARD_TIMEOUT_MS") {
            match raw.trim().parse() {
                Ok(ms) => self.timeout_ms = ms,
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring JOBBOARD_TIMEOUT_MS"),
            }
        }
        if let Some(raw) = non_empty("JOBBOARD_RETRIES") {
            match raw.trim().parse() {
                Ok(retries) => self.retries = retries,
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring JOBBOARD_RETRIES"),
            }
        }
        if let Some(token) = non_empty("JOBBOARD_ADMIN_TOKEN") {
            self.admin_token = Some(token);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.local_origin, "http://localhost:3000");
        assert_eq!(config.remote_origin, DEFAULT_REMOTE_ORIGIN);
        assert_eq!(config.timeout(), Duration::from_secs(40));
        assert_eq!(config.retries, 3);
        assert!(config.admin_token.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            remote_origin = "https://backup.example.com"
            retries = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.remote_origin, "https://backup.example.com");
        assert_eq!(config.retries, 1);
        assert_eq!(config.local_origin, DEFAULT_LOCAL_ORIGIN);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ClientConfig::from_toml("retries = \"many\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::default().with_env(lookup(&[
            ("JOBBOARD_REMOTE_ORIGIN", "http://127.0.0.1:9000"),
            ("JOBBOARD_TIMEOUT_MS", "500"),
            ("JOBBOARD_RETRIES", "0"),
            ("JOBBOARD_ADMIN_TOKEN", "t0ken"),
        ]));
        assert_eq!(config.remote_origin, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.retries, 0);
        assert_eq!(config.admin_token.as_deref(), Some("t0ken"));
    }

    #[test]
    fn test_env_ignores_garbage() {
        let config = ClientConfig::default().with_env(lookup(&[
            ("JOBBOARD_TIMEOUT_MS", "soon"),
            ("JOBBOARD_LOCAL_ORIGIN", "  "),
        ]));
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.local_origin, DEFAULT_LOCAL_ORIGIN);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClientConfig::load(Path::new("/nonexistent/jobboard.toml")).unwrap_err();
        assert!(!err.is_retryable());
    }
}
