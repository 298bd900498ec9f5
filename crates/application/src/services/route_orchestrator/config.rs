//! Orchestrator settings

use domain::entities::Landmark;
use domain::value_objects::GeoLocation;

use crate::error::ApplicationError;
use crate::ports::SearchRegion;

/// Configuration for the route orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// Origin of every route, center of the search region and landmark position
    pub home: GeoLocation,
    /// Name shown on the landmark marker
    pub landmark_name: String,
    /// Search region half-width in meters
    pub search_radius_meters: f64,
    /// Camera distance when the screen first appears
    pub initial_zoom_distance: f64,
    /// Closest allowed camera distance
    pub min_zoom_distance: f64,
    /// Farthest allowed camera distance
    pub max_zoom_distance: f64,
    /// Map-point margin around a framed route
    pub route_padding: f64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            home: GeoLocation::college_lasalle(),
            landmark_name: "Collège LaSalle".to_string(),
            search_radius_meters: 2500.0,
            initial_zoom_distance: 2000.0,
            min_zoom_distance: 100.0,
            max_zoom_distance: 40_000_000.0,
            route_padding: 300.0,
        }
    }
}

impl OrchestratorConfig {
    /// Landmark marker for the home location
    #[must_use]
    pub fn landmark(&self) -> Landmark {
        Landmark::new(self.landmark_name.clone(), self.home)
    }

    /// Region that place searches are scoped to
    #[must_use]
    pub const fn search_region(&self) -> SearchRegion {
        SearchRegion::new(self.home, self.search_radius_meters)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` describing the first invalid value.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.search_radius_meters.is_nan() || self.search_radius_meters <= 0.0 {
            return Err(ApplicationError::Configuration(
                "search_radius_meters must be greater than 0".to_string(),
            ));
        }
        if self.min_zoom_distance.is_nan()
            || self.min_zoom_distance <= 0.0
            || self.min_zoom_distance > self.max_zoom_distance
        {
            return Err(ApplicationError::Configuration(
                "zoom bounds must satisfy 0 < min_zoom_distance <= max_zoom_distance".to_string(),
            ));
        }
        if !(self.min_zoom_distance..=self.max_zoom_distance).contains(&self.initial_zoom_distance)
        {
            return Err(ApplicationError::Configuration(
                "initial_zoom_distance must lie within the zoom bounds".to_string(),
            ));
        }
        if !self.route_padding.is_finite() || self.route_padding < 0.0 {
            return Err(ApplicationError::Configuration(
                "route_padding must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}
