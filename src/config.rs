//! # Reservation Configuration
//!
//! Typed configuration for the submission gateway, the wizard and logging.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`RESERVATION__GATEWAY__TIMEOUT_MS=15000`)
//! 2. Config file (explicit path, or `./config/reservation.toml` / `./reservation.toml`)
//! 3. Default values

use config::{Config, Environment, File};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::constants::system::{
    DEFAULT_EVENT_CAPACITY, DEFAULT_FALLBACK_PHONE, DEFAULT_GATEWAY_ENDPOINT,
    DEFAULT_GATEWAY_TIMEOUT_MS, DEFAULT_RESET_DELAY_MS, MAX_GATEWAY_TIMEOUT_MS,
    MAX_RESET_DELAY_MS, MIN_GATEWAY_TIMEOUT_MS,
};

pub const ENV_PREFIX: &str = "RESERVATION";

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigurationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Root configuration for the reservation core
///
/// # Examples
///
/// ```rust
/// use reservation_core::config::ReservationConfig;
///
/// let config = ReservationConfig::default();
/// assert_eq!(config.gateway.timeout_ms, 20_000);
/// assert_eq!(config.wizard.reset_delay_ms, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationConfig {
    pub gateway: GatewayConfig,
    pub wizard: WizardConfig,
    pub logging: LoggingConfig,
}

/// Submission gateway endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Form-relay endpoint receiving the JSON payload
    pub endpoint: String,
    /// Client-side request timeout in milliseconds
    pub timeout_ms: u64,
    /// Overrides the default `reservation-core/<version>` user agent
    pub user_agent: Option<String>,
}

/// Booking wizard behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Delay between closing the wizard and clearing the draft
    pub reset_delay_ms: u64,
    /// Number shown to guests when an online request fails
    pub fallback_phone: String,
    /// Buffered lifecycle events per subscriber
    pub event_capacity: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Explicit filter directive; falls back to the environment default
    pub level: Option<String>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GATEWAY_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_GATEWAY_TIMEOUT_MS,
            user_agent: None,
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            fallback_phone: DEFAULT_FALLBACK_PHONE.to_string(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("reservation-core/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn endpoint_url(&self) -> ConfigResult<Url> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| ConfigurationError::invalid("gateway.endpoint", e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigurationError::invalid(
                "gateway.endpoint",
                format!("unsupported scheme {other:?}"),
            )),
        }
    }
}

impl WizardConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

impl ReservationConfig {
    /// Load configuration from the discovered config file and environment
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of searching for a file
    pub fn load_from(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigurationError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                debug!("Loading reservation config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(found) = Self::find_config_file() {
                    debug!("Loading reservation config from: {}", found.display());
                    builder = builder.add_source(File::from(found).required(true));
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;

        debug!(
            endpoint = %config.gateway.endpoint,
            timeout_ms = config.gateway.timeout_ms,
            reset_delay_ms = config.wizard.reset_delay_ms,
            "Loaded reservation configuration"
        );
        Ok(config)
    }

    fn find_config_file() -> Option<PathBuf> {
        ["./config/reservation.toml", "./reservation.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file())
    }

    /// Check bounds and formats that serde alone cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        self.gateway.endpoint_url()?;

        if !(MIN_GATEWAY_TIMEOUT_MS..=MAX_GATEWAY_TIMEOUT_MS).contains(&self.gateway.timeout_ms) {
            return Err(ConfigurationError::invalid(
                "gateway.timeout_ms",
                format!(
                    "{} is outside {MIN_GATEWAY_TIMEOUT_MS}..={MAX_GATEWAY_TIMEOUT_MS}",
                    self.gateway.timeout_ms
                ),
            ));
        }

        if self.wizard.reset_delay_ms > MAX_RESET_DELAY_MS {
            return Err(ConfigurationError::invalid(
                "wizard.reset_delay_ms",
                format!("{} exceeds {MAX_RESET_DELAY_MS}", self.wizard.reset_delay_ms),
            ));
        }

        if self.wizard.fallback_phone.trim().is_empty() {
            return Err(ConfigurationError::invalid(
                "wizard.fallback_phone",
                "must not be empty",
            ));
        }

        if self.wizard.event_capacity == 0 {
            return Err(ConfigurationError::invalid(
                "wizard.event_capacity",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}
