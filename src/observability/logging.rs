//! # Structured Logging
//!
//! Span macros and subscriber setup on top of the tracing ecosystem. The
//! library only emits events; installing a subscriber is left to the
//! application, which can use [`init_logging`].

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};
use validator::Validate;

use crate::errors::{CredHubError, Result};

/// Create a tracing span for one CredHub HTTP exchange.
///
/// ```rust,ignore
/// let span = request_span!("GET", "/api/v1/data");
/// let span = request_span!("DELETE", "/api/v1/data", credential = "/c/app/db");
/// ```
macro_rules! request_span {
    ($method:expr, $path:expr) => {
        tracing::debug_span!(
            "credhub_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4()
        )
    };
    ($method:expr, $path:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "credhub_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

pub(crate) use request_span;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = CredHubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CredHubError::config(format!("Unknown log format '{}'", other))),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), format: LogFormat::Text }
    }
}

impl LoggingConfig {
    /// Read `CREDHUB_LOG_LEVEL` and `CREDHUB_LOG_FORMAT`.
    pub fn from_env() -> Self {
        let log_level = std::env::var("CREDHUB_LOG_LEVEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        let format = std::env::var("CREDHUB_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse::<LogFormat>().ok())
            .unwrap_or_default();

        Self { log_level, format }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.log_level).map_err(|e| {
                CredHubError::config(format!("Invalid log level '{}': {}", self.log_level, e))
            }),
        }
    }
}

/// Install a global fmt subscriber. Returns `false` when one was already set.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    Validate::validate(config).map_err(CredHubError::from)?;
    let filter = config.env_filter()?;

    let installed = match config.format {
        LogFormat::Text => {
            fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).try_init()
        }
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    Ok(installed.is_ok())
}
