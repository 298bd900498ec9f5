//! Application layer - Use cases and orchestration
//!
//! Contains the route orchestrator and the port definitions it drives.
//! Coordinates domain objects and infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, NavigationError};
pub use ports::*;
pub use services::*;
