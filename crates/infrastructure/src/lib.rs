//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports over the routing integration clients,
//! loads configuration and installs logging.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod wiring;

pub use adapters::*;
pub use config::{AppConfig, ConfigError, MapConfig};
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
pub use wiring::{MapServices, build_map_services};
