use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors that can occur while installing the subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber is already set, or the filter is invalid
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Line format
    #[serde(default)]
    pub format: LogFormat,

    /// `EnvFilter` directive used when neither `RUST_LOG` nor `-v` is given
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Include the event target (module path)
    #[serde(default)]
    pub with_target: bool,
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: default_filter(),
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Pick the filter directive: `RUST_LOG`, then `override_filter`, then the configured one
    fn env_filter(&self, override_filter: Option<&str>) -> Result<EnvFilter, TelemetryError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        let directive = override_filter.unwrap_or(&self.filter);
        EnvFilter::try_new(directive).map_err(|e| TelemetryError::Init(e.to_string()))
    }
}

/// Install the global subscriber, writing to stderr
///
/// # Errors
///
/// Returns `TelemetryError::Init` if the filter directive is invalid or a
/// subscriber is already installed.
pub fn init_logging(
    config: &LoggingConfig,
    override_filter: Option<&str>,
) -> Result<(), TelemetryError> {
    let env_filter = config.env_filter(override_filter)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Text => registry.with(fmt_layer).try_init(),
        LogFormat::Json => registry.with(fmt_layer.json()).try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(format = %config.format, "Logging initialized");
    Ok(())
}
