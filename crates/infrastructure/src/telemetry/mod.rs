//! Logging initialisation
//!
//! Installs the global `tracing` subscriber for the binary.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, init_logging};
