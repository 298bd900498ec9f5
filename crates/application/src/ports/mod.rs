//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod directions_port;
mod location_port;
mod place_search_port;

pub use directions_port::{DirectionsPort, DirectionsRequest};
#[cfg(test)]
pub use directions_port::MockDirectionsPort;
pub use location_port::LocationPort;
#[cfg(test)]
pub use location_port::MockLocationPort;
pub use place_search_port::{PlaceSearchPort, SearchRegion};
#[cfg(test)]
pub use place_search_port::MockPlaceSearchPort;
