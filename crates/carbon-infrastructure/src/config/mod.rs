mod timeouts;

pub use timeouts::TimeoutConfig;

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const ENV_API_URL: &str = "CARBON_API_URL";
pub const ENV_DATA_DIR: &str = "CARBON_DATA_DIR";
pub const ENV_LOG_DIR: &str = "CARBON_LOG_DIR";
pub const ENV_STORAGE_SLOT: &str = "CARBON_STORAGE_SLOT";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "CARBON_HTTP_TIMEOUT_SECS";

/// Slot that holds the local calculation log
pub const DEFAULT_STORAGE_SLOT: &str = "carbon_calculations";

const APP_DIR_NAME: &str = "carbon-tracker";
const DATABASE_FILE: &str = "carbon-tracker.db";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API base URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Runtime configuration resolved from the environment
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Network API root; `None` runs fully offline
    pub api_base_url: Option<Url>,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub storage_slot: String,
    pub timeouts: TimeoutConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            api_base_url: None,
            log_dir: data_dir.join("logs"),
            data_dir,
            storage_slot: DEFAULT_STORAGE_SLOT.to_string(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_API_URL) {
            config.api_base_url = Some(parse_api_base_url(&url)?);
        }

        if let Some(dir) = get(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
            config.log_dir = config.data_dir.join("logs");
        }

        if let Some(dir) = get(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(dir);
        }

        if let Some(slot) = get(ENV_STORAGE_SLOT) {
            config.storage_slot = slot.trim().to_string();
        }

        if let Some(secs) = get(ENV_HTTP_TIMEOUT_SECS) {
            let parsed: u64 = secs
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidNumber {
                    key: ENV_HTTP_TIMEOUT_SECS,
                    value: secs.clone(),
                })?;
            config.timeouts = config
                .timeouts
                .with_http_request(Duration::from_secs(parsed));
        }

        Ok(config)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    pub fn is_offline(&self) -> bool {
        self.api_base_url.is_none()
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Parse an http(s) base URL and make sure its path ends in `/` so that
/// endpoint paths join beneath it rather than replacing the last segment.
pub fn parse_api_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason,
    };

    let mut url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
