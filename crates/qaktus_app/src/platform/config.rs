use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use qaktus_core::DEFAULT_PUBLIC_BASE;
use qaktus_engine::ClientSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

const CONFIG_FILENAME: &str = "qaktus.ron";
const CONFIG_ENV: &str = "QAKTUS_CONFIG";
const MIN_TIMEOUT_SECS: u64 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub public_base_url: String,
    pub generate_endpoint: String,
    pub waitlist_endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            public_base_url: DEFAULT_PUBLIC_BASE.to_string(),
            generate_endpoint: client.generate_endpoint,
            waitlist_endpoint: client.waitlist_endpoint,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Timeouts below one second are raised to one second.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            generate_endpoint: self.generate_endpoint.clone(),
            waitlist_endpoint: self.waitlist_endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs.max(MIN_TIMEOUT_SECS)),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(MIN_TIMEOUT_SECS)),
        }
    }
}

/// `$QAKTUS_CONFIG` when set, else `./qaktus.ron`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// Loads the config file. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
