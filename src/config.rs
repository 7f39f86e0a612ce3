//! Dashboard configuration.
//!
//! Loaded from `dashboard.toml` when present, with every field optional
//! and defaulted, then overridden by environment variables (a `.env` file
//! is honored via dotenv in `main`):
//!
//!   DASHBOARD_API_URL    - backend base URL
//!   DASHBOARD_LOG_LEVEL  - debug | info | warn | error

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Default backend address, matching the development server.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5050";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Config file shape
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_base_url: Option<String>,
    timeout_secs: Option<u64>,
    log_level: Option<String>,
    log_file: Option<String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL, without a trailing slash.
    pub api_base_url: String,
    pub timeout: Duration,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Loads configuration from `path`, treating a missing file as all
/// defaults and a malformed file as an error.
pub fn load_config(path: &Path) -> Result<Config, String> {
    let file = match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<ConfigFile>(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display()))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ConfigFile::default(),
        Err(e) => return Err(format!("failed to read config '{}': {e}", path.display())),
    };
    Ok(resolve(file, env_overrides()))
}

struct EnvOverrides {
    api_url: Option<String>,
    log_level: Option<String>,
}

fn env_overrides() -> EnvOverrides {
    EnvOverrides {
        api_url: std::env::var("DASHBOARD_API_URL").ok(),
        log_level: std::env::var("DASHBOARD_LOG_LEVEL").ok(),
    }
}

fn resolve(file: ConfigFile, env: EnvOverrides) -> Config {
    let defaults = Config::default();
    let base_url = env
        .api_url
        .or(file.api_base_url)
        .unwrap_or(defaults.api_base_url);
    Config {
        api_base_url: base_url.trim_end_matches('/').to_string(),
        timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        log_level: env
            .log_level
            .or(file.log_level)
            .unwrap_or(defaults.log_level),
        log_file: file.log_file,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/dashboard.toml")).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_file_values_parse() {
        let file: ConfigFile = toml::from_str(
            r#"
            api_base_url = "http://survey.example.tw/"
            timeout_secs = 10
            log_level = "debug"
            log_file = "dashboard.log"
            "#,
        )
        .unwrap();
        let config = resolve(
            file,
            EnvOverrides {
                api_url: None,
                log_level: None,
            },
        );
        assert_eq!(
            config.api_base_url, "http://survey.example.tw",
            "trailing slash is stripped so URL joins stay clean"
        );
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file.as_deref(), Some("dashboard.log"));
    }

    #[test]
    fn test_env_overrides_beat_file_values() {
        let file: ConfigFile = toml::from_str(r#"api_base_url = "http://from-file""#).unwrap();
        let config = resolve(
            file,
            EnvOverrides {
                api_url: Some("http://from-env".to_string()),
                log_level: Some("error".to_string()),
            },
        );
        assert_eq!(config.api_base_url, "http://from-env");
        assert_eq!(config.log_level, "error");
    }
}
