//! Place search port
//!
//! Defines the interface for free-text place lookup around a region.
//! Adapters in the infrastructure layer implement this port using geocoding APIs.

use async_trait::async_trait;
use domain::entities::Place;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Area that search results should come from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchRegion {
    /// Center of the region
    pub center: GeoLocation,
    /// Half the side length of the square region, in meters
    pub radius_meters: f64,
}

impl SearchRegion {
    /// Create a search region
    #[must_use]
    pub const fn new(center: GeoLocation, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
        }
    }

    /// Bounding box as `(south, west, north, east)` in degrees
    #[must_use]
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        let (lat_delta, lon_delta) = self.center.degree_span(self.radius_meters);
        (
            (self.center.latitude() - lat_delta).max(-90.0),
            (self.center.longitude() - lon_delta).max(-180.0),
            (self.center.latitude() + lat_delta).min(90.0),
            (self.center.longitude() + lon_delta).min(180.0),
        )
    }
}

/// Port for place search operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlaceSearchPort: Send + Sync {
    /// Search for places matching `query`, best match first
    ///
    /// An empty list means the service found nothing.
    async fn search(
        &self,
        query: &str,
        region: &SearchRegion,
    ) -> Result<Vec<Place>, ApplicationError>;
}
