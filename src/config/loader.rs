//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::{Config, Environment};

const CONFIG_FILENAME: &str = "crowdax.toml";

/// Environment variable that overrides the configured backend base URL
pub const BASE_URL_VAR: &str = "CROWDAX_API_BASE_URL";

/// Load configuration from crowdax.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Resolve the effective configuration. Never fails: a missing config file
/// falls back to compiled-in defaults, and `CROWDAX_API_BASE_URL` /
/// `CROWDAX_ENV` override whatever was loaded. Missing expected variables
/// are logged in development mode only.
pub fn resolve() -> Config {
    let mut config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            if Environment::from_env() == Environment::Development {
                tracing::warn!("No crowdax.toml loaded ({}), using defaults", e);
            }
            Config::default()
        }
    };

    config.environment = Environment::from_env();

    match env::var(BASE_URL_VAR) {
        Ok(base_url) if !base_url.is_empty() => config.api.base_url = base_url,
        _ => {
            if config.is_development() {
                tracing::warn!(
                    "Missing environment variable: {}. Using {}",
                    BASE_URL_VAR,
                    config.api.base_url
                );
            }
        }
    }

    config
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<std::path::PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant; a panic here is a programming
    // error in the pattern, not a runtime condition
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Crowdax client configuration

[api]
# Backend API base URL; CROWDAX_API_BASE_URL takes precedence when set
base_url = "${CROWDAX_API_BASE_URL:-http://localhost:3000}"
# Per-request timeout in milliseconds
timeout_ms = 10000

[session]
# Where the persisted session (token + user record) lives
file = ".crowdax/session.json"

[app]
name = "Crowdax"

# Either "development" or "production"; CROWDAX_ENV takes precedence
environment = "development"
"#
}
