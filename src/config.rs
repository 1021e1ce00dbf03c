use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::utils::RetryConfig;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Loaded from the TOML file named by VOLUNTEER_REGISTRY_CONFIG. Every section
// and key is optional; missing values fall back to the defaults below.
//
// ============================================================================

pub const CONFIG_PATH_ENV: &str = "VOLUNTEER_REGISTRY_CONFIG";

/// Upper bound for `sweep.pet_retention_days` (one hundred years)
pub const MAX_PET_RETENTION_DAYS: i64 = 36_500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub sweep: SweepConfig,
    pub retry: RetrySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, overridden by RUST_LOG
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,volunteer_registry=debug".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// How long a soft-deleted pet is kept before it is purged
    pub pet_retention_days: i64,
    pub interval_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            pet_retention_days: 30,
            interval_secs: 3600,
        }
    }
}

impl SweepConfig {
    /// Retention clamped to 0..=MAX_PET_RETENTION_DAYS
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(self.pet_retention_days.clamp(0, MAX_PET_RETENTION_DAYS))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        let defaults = RetryConfig::default();
        Self {
            max_attempts: defaults.max_attempts,
            initial_delay_ms: defaults.initial_delay.as_millis() as u64,
            max_delay_ms: defaults.max_delay.as_millis() as u64,
            multiplier: defaults.multiplier,
        }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        RetryConfig {
            max_attempts: settings.max_attempts,
            initial_delay: Duration::from_millis(settings.initial_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            multiplier: settings.multiplier,
        }
    }
}

impl AppConfig {
    /// Load from the file named by VOLUNTEER_REGISTRY_CONFIG, or defaults when unset
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_PET_RETENTION_DAYS).contains(&self.sweep.pet_retention_days) {
            return Err(ConfigError::Invalid(format!(
                "sweep.pet_retention_days must be between 0 and {MAX_PET_RETENTION_DAYS}"
            )));
        }
        if self.sweep.interval_secs == 0 {
            return Err(ConfigError::Invalid("sweep.interval_secs must be positive".into()));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid("retry.max_attempts must be at least 1".into()));
        }
        if self.retry.multiplier.is_nan() || self.retry.multiplier < 1.0 {
            return Err(ConfigError::Invalid("retry.multiplier must be >= 1.0".into()));
        }
        Ok(())
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::from(&self.retry)
    }
}
