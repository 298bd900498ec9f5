//! Directions service port
//!
//! Defines the interface for computing a route between two coordinates.
//! Adapters in the infrastructure layer implement this port using routing APIs.

use std::fmt;

use async_trait::async_trait;
use domain::entities::Route;
use domain::value_objects::{GeoLocation, RoutingProfile};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A single routing request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    /// Start of the route
    pub origin: GeoLocation,
    /// End of the route
    pub destination: GeoLocation,
    /// Travel profile the service should use
    pub profile: RoutingProfile,
}

impl DirectionsRequest {
    /// Create a directions request
    #[must_use]
    pub const fn new(origin: GeoLocation, destination: GeoLocation, profile: RoutingProfile) -> Self {
        Self {
            origin,
            destination,
            profile,
        }
    }
}

impl fmt::Display for DirectionsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {} ({})", self.origin, self.destination, self.profile)
    }
}

/// Port for route computation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectionsPort: Send + Sync {
    /// Compute routes for the request, preferred route first
    ///
    /// An empty list means the service knows no route.
    async fn routes(&self, request: &DirectionsRequest) -> Result<Vec<Route>, ApplicationError>;
}
