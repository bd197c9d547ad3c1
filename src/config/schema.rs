//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub environment: Environment,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ApiConfig {
    /// Build a full URL for an endpoint, normalizing slashes on both sides
    pub fn url_for(&self, endpoint: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = endpoint.trim_start_matches('/');
        format!("{}/{}", base, endpoint)
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where the session file (token + user record) lives
    #[serde(default = "default_session_file")]
    pub file: PathBuf,
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".crowdax/session.json")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: default_session_file(),
        }
    }
}

/// Application metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
}

fn default_app_name() -> String {
    "Crowdax".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
        }
    }
}

impl AppConfig {
    /// Compiled-in crate version
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

/// Runtime environment, selected by `CROWDAX_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Read from `CROWDAX_ENV`; anything other than "production" is development
    pub fn from_env() -> Self {
        match std::env::var("CROWDAX_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl Config {
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.session.file, PathBuf::from(".crowdax/session.json"));
        assert_eq!(config.app.name, "Crowdax");
        assert!(config.is_development());
    }

    #[test]
    fn test_url_for_strips_slashes() {
        let api = ApiConfig {
            base_url: "http://localhost:3000/".to_string(),
            timeout_ms: 10_000,
        };
        assert_eq!(api.url_for("/auth/me"), "http://localhost:3000/auth/me");
        assert_eq!(api.url_for("auth/me"), "http://localhost:3000/auth/me");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"https://api.crowdax.io\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://api.crowdax.io");
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.app.name, "Crowdax");
    }

    #[test]
    fn test_environment_parses_lowercase() {
        let config: Config = toml::from_str("environment = \"production\"\n").unwrap();
        assert!(config.is_production());
    }
}
