//! Route entity
//!
//! A computed path from the home location to a destination, as returned by
//! the directions service, together with the display values derived from it.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{GeoLocation, MapRect, RoutingProfile};

/// A computed route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    polyline: Vec<GeoLocation>,
    distance_meters: f64,
    duration_seconds: f64,
    profile: RoutingProfile,
}

impl Route {
    /// Create a route from service output
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyGeometry` for an empty polyline and
    /// `DomainError::ValidationError` for a negative or non-finite
    /// distance or duration.
    pub fn new(
        polyline: Vec<GeoLocation>,
        distance_meters: f64,
        duration_seconds: f64,
        profile: RoutingProfile,
    ) -> Result<Self, DomainError> {
        if polyline.is_empty() {
            return Err(DomainError::EmptyGeometry("route polyline".to_string()));
        }
        if !distance_meters.is_finite() || distance_meters < 0.0 {
            return Err(DomainError::ValidationError(format!(
                "route distance must be a non-negative number, got {distance_meters}"
            )));
        }
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(DomainError::ValidationError(format!(
                "route duration must be a non-negative number, got {duration_seconds}"
            )));
        }

        Ok(Self {
            polyline,
            distance_meters,
            duration_seconds,
            profile,
        })
    }

    #[must_use]
    pub fn polyline(&self) -> &[GeoLocation] {
        &self.polyline
    }

    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    #[must_use]
    pub const fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Profile the directions service used for this route
    #[must_use]
    pub const fn profile(&self) -> RoutingProfile {
        self.profile
    }

    /// Distance in kilometers rounded half away from zero to 2 decimals
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        (self.distance_meters / 10.0).round() / 100.0
    }

    /// Expected travel time in whole minutes, rounded to nearest
    #[must_use]
    pub fn duration_minutes(&self) -> u64 {
        (self.duration_seconds / 60.0).round() as u64
    }

    /// Kilometers as shown on screen, e.g. `"12.35"`
    #[must_use]
    pub fn distance_text(&self) -> String {
        format!("{:.2}", self.distance_km())
    }

    /// Minutes as shown on screen, e.g. `"13"`
    #[must_use]
    pub fn travel_time_text(&self) -> String {
        self.duration_minutes().to_string()
    }

    /// Projected rectangle enclosing the whole polyline
    #[must_use]
    pub fn bounding_rect(&self) -> MapRect {
        // Non-empty by construction
        MapRect::from_locations(&self.polyline)
            .unwrap_or_else(|_| MapRect::new(0.0, 0.0, 0.0, 0.0))
    }

    /// Rectangle the camera frames for this route
    #[must_use]
    pub fn framing(&self, padding: f64) -> MapRect {
        self.bounding_rect().padded(padding)
    }
}
