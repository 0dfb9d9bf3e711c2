use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::RwLock;
use tracing::info;

use carbon_infrastructure::config::{parse_api_base_url, TrackerConfig};

const CONFIG_FILE: &str = "app_config.json";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown log level {0:?} (expected error, warn, info, debug or trace)")]
pub struct UnknownLogLevel(String);

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Filter directive for the logger: quiet dependencies, this workspace
    /// at the chosen level
    pub fn filter_directive(&self) -> String {
        let level = self.as_str();
        format!(
            "warn,carbon_app={level},carbon_infrastructure={level},carbon_domain={level},carbon_tracker={level}"
        )
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(UnknownLogLevel(value.to_string())),
        }
    }
}

/// Persistent configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AppConfig {
    #[serde(default)]
    log_level: LogLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_base_url: Option<String>,
}

/// User settings persisted as JSON in the data directory
pub struct ConfigService {
    log_level: AtomicU8,
    api_base_url: RwLock<Option<String>>,
    config_path: PathBuf,
}

impl ConfigService {
    /// Load settings from `config_dir`, creating the directory if needed. An
    /// unreadable file yields defaults.
    pub fn new(config_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(config_dir).with_context(|| {
            format!("Failed to create config directory {}", config_dir.display())
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            serde_json::from_str::<AppConfig>(&content).unwrap_or_default()
        } else {
            AppConfig::default()
        };

        Ok(Self {
            log_level: AtomicU8::new(config.log_level as u8),
            api_base_url: RwLock::new(config.api_base_url),
            config_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn get_log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.log_level.load(Ordering::Relaxed))
    }

    /// Set log level and persist to disk; takes effect on the next run
    pub fn set_log_level(&self, level: LogLevel) -> Result<()> {
        self.log_level.store(level as u8, Ordering::Relaxed);
        self.persist()?;
        info!("Log level set to {}", level.as_str());
        Ok(())
    }

    pub fn get_api_base_url(&self) -> Option<String> {
        self.api_base_url
            .read()
            .map(|url| url.clone())
            .unwrap_or_default()
    }

    /// Set or clear the persisted API base URL
    pub fn set_api_base_url(&self, url: Option<&str>) -> Result<()> {
        let normalized = match url {
            Some(url) => Some(parse_api_base_url(url)?.to_string()),
            None => None,
        };

        {
            let mut guard = self
                .api_base_url
                .write()
                .map_err(|_| anyhow::anyhow!("Config lock poisoned"))?;
            *guard = normalized.clone();
        }
        self.persist()?;

        match normalized {
            Some(url) => info!("API base URL set to {}", url),
            None => info!("API base URL cleared"),
        }
        Ok(())
    }

    /// Fill settings the environment left unset from the persisted ones
    pub fn apply_to(&self, config: &mut TrackerConfig) -> Result<()> {
        if config.api_base_url.is_none() {
            if let Some(url) = self.get_api_base_url() {
                config.api_base_url = Some(
                    parse_api_base_url(&url).context("Persisted API base URL is invalid")?,
                );
            }
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let config = AppConfig {
            log_level: self.get_log_level(),
            api_base_url: self.get_api_base_url(),
        };
        let content = serde_json::to_string_pretty(&config)?;
        std::fs::write(&self.config_path, content)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;
        Ok(())
    }
}
