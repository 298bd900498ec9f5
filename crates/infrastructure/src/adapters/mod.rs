//! Infrastructure adapters
//!
//! Adapters connect application ports to the routing integration clients.

mod directions_adapter;
mod location_adapter;
mod place_search_adapter;

use application::error::ApplicationError;
use integration_routing::RoutingError;

pub use directions_adapter::RoutingDirectionsAdapter;
pub use location_adapter::{LocationPublisher, WatchLocationProvider, location_channel};
pub use place_search_adapter::NominatimPlaceSearchAdapter;

/// Translate a client error into the application error space
fn map_routing_error(operation: &str, err: RoutingError) -> ApplicationError {
    match err {
        RoutingError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
        RoutingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(format!("{operation} failed: {other}")),
    }
}
