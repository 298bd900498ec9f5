//! Domain layer for mapnav
//!
//! Contains the map navigator's entities, value objects, and domain errors.
//! This layer performs no I/O and defines the ubiquitous language shared by
//! the route orchestrator and the service adapters.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
