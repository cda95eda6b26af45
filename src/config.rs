// Application configuration - defaults, then config.toml, then environment

use crate::history::HistoryConfig;
use crate::service::ServiceConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Optional keys of `config.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub history_file: Option<PathBuf>,
}

/// Resolved configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub history: HistoryConfig,
}

/// `~/.javacoder/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".javacoder").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".javacoder/config.toml"))
}

/// Parse an environment variable, logging a warning if the value is present but invalid.
fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(v) => match v.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %v, "Invalid env var value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

impl AppConfig {
    /// Load from `path` (if it exists) and the environment
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = AppConfig::default();
        if let Some(file) = load_file(path)? {
            config.apply_file(file);
        }
        config.apply_env();

        debug!(
            endpoint = %config.service.endpoint,
            history = %config.history.path.display(),
            "configuration resolved"
        );
        Ok(config)
    }

    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(endpoint) = file.endpoint {
            self.service.endpoint = endpoint;
        }
        if let Some(timeout) = file.timeout_secs {
            self.service.request_timeout_secs = timeout;
        }
        if let Some(retries) = file.max_retries {
            self.service.max_retries = retries;
        }
        if let Some(delay) = file.retry_delay_ms {
            self.service.base_retry_delay_ms = delay;
        }
        if let Some(path) = file.history_file {
            self.history.path = path;
        }
    }

    pub fn apply_env(&mut self) {
        if let Ok(endpoint) = std::env::var("JAVACODER_ENDPOINT") {
            self.service.endpoint = endpoint;
        }
        self.service.request_timeout_secs =
            parse_env_var("JAVACODER_TIMEOUT_SECS", self.service.request_timeout_secs);
        self.service.max_retries =
            parse_env_var("JAVACODER_MAX_RETRIES", self.service.max_retries);
        self.service.base_retry_delay_ms =
            parse_env_var("JAVACODER_RETRY_DELAY_MS", self.service.base_retry_delay_ms);
        if let Ok(path) = std::env::var("JAVACODER_HISTORY_FILE") {
            self.history.path = PathBuf::from(path);
        }
    }
}

fn load_file(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: FileConfig = toml::from_str(&content)?;

    debug!(path = %path.display(), "loaded config file");
    Ok(Some(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_overrides_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
endpoint = "http://runner.internal:9000"
timeout_secs = 5
history_file = "/tmp/runs.json"
"#,
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.apply_file(file);

        assert_eq!(config.service.endpoint, "http://runner.internal:9000");
        assert_eq!(config.service.request_timeout_secs, 5);
        assert_eq!(config.service.max_retries, ServiceConfig::default().max_retries);
        assert_eq!(config.history.path, PathBuf::from("/tmp/runs.json"));
        assert_eq!(config.history.capacity, 10);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(toml::from_str::<FileConfig>("endpont = \"x\"").is_err());
    }

    #[test]
    fn test_missing_file_gives_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_file(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "endpoint = [").unwrap();
        assert!(matches!(load_file(&path), Err(ConfigError::TomlParse(_))));
    }
}
