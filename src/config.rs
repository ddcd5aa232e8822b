//! Configuration management for the `DepBrief` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::DepbriefError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `DepBrief` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepbriefConfig {
    /// Reference-data configuration
    #[serde(default)]
    pub data: DataConfig,
    /// Weather feed configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Preference store configuration
    #[serde(default)]
    pub prefs: PrefsConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reference-data configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the tab-separated snapshot tables
    #[serde(default = "default_data_dir")]
    pub dir: String,
}

/// Weather feed configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the METAR text endpoint
    #[serde(default = "default_metar_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
    /// Seconds between watchlist re-polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Concurrent station fetches per batch
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
}

/// Preference store configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefsConfig {
    /// Preference store directory location
    #[serde(default = "default_prefs_location")]
    pub location: String,
}

/// Web server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the JSON API listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_data_dir() -> String {
    "data".to_string()
}

fn default_metar_base_url() -> String {
    "https://metar.vatsim.net/metar.php".to_string()
}

fn default_weather_timeout() -> u32 {
    15
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_poll_interval() -> u64 {
    60
}

fn default_fetch_concurrency() -> usize {
    5
}

fn default_prefs_location() -> String {
    "~/.local/share/depbrief/prefs".to_string()
}

fn default_server_port() -> u16 {
    8750
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_metar_base_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
            poll_interval_seconds: default_poll_interval(),
            fetch_concurrency: default_fetch_concurrency(),
        }
    }
}

impl Default for PrefsConfig {
    fn default() -> Self {
        Self {
            location: default_prefs_location(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DepbriefConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            weather: WeatherConfig::default(),
            prefs: PrefsConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl DepbriefConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("depbrief.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with DEPBRIEF_ prefix,
        // e.g. DEPBRIEF_WEATHER__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("DEPBRIEF")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: DepbriefConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("depbrief").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.data.dir.is_empty() {
            return Err(DepbriefError::config("Data directory cannot be empty").into());
        }

        if self.weather.base_url.is_empty() {
            return Err(DepbriefError::config("METAR base URL cannot be empty").into());
        }

        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(
                DepbriefError::config("Weather timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.weather.max_retries > 10 {
            return Err(DepbriefError::config("Weather max retries cannot exceed 10").into());
        }

        if self.weather.poll_interval_seconds < 10 {
            return Err(
                DepbriefError::config("Poll interval below 10 seconds would hammer the feed")
                    .into(),
            );
        }

        if self.weather.fetch_concurrency == 0 || self.weather.fetch_concurrency > 20 {
            return Err(
                DepbriefError::config("Fetch concurrency must be between 1 and 20").into(),
            );
        }

        Ok(())
    }
}
