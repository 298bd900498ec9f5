//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Mean earth radius used for great-circle distances
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters per degree of latitude (spherical approximation)
const METERS_PER_DEGREE: f64 = 111_320.0;

/// A geographic location with latitude and longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::invalid_coordinates(latitude, longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation (for trusted sources)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another location in meters (Haversine)
    #[must_use]
    pub fn distance_meters(&self, other: &Self) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }

    /// Great-circle distance to another location in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        self.distance_meters(other) / 1000.0
    }

    /// Degree extents (latitude, longitude) covering `meters` around this location
    ///
    /// Longitude degrees shrink with latitude; near the poles the longitude
    /// extent is capped at 180 degrees.
    #[must_use]
    pub fn degree_span(&self, meters: f64) -> (f64, f64) {
        let lat_delta = meters / METERS_PER_DEGREE;
        let cos_lat = self.latitude.to_radians().cos().abs();
        let lon_delta = if cos_lat < 1e-9 {
            180.0
        } else {
            (meters / (METERS_PER_DEGREE * cos_lat)).min(180.0)
        };
        (lat_delta, lon_delta)
    }

    /// Collège LaSalle, Montréal - the default home location and landmark
    #[must_use]
    pub const fn college_lasalle() -> Self {
        Self::new_unchecked(45.4919, -73.5794)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let loc = GeoLocation::new(45.50, -73.58).expect("valid coordinates");
        assert!((loc.latitude() - 45.50).abs() < f64::EPSILON);
        assert!((loc.longitude() + 73.58).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoLocation::new(90.0, 180.0).is_ok());
        assert!(GeoLocation::new(-90.0, -180.0).is_ok());
        assert!(GeoLocation::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(-91.0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_longitude() {
        let err = GeoLocation::new(0.0, 181.0).unwrap_err();
        assert_eq!(err, DomainError::invalid_coordinates(0.0, 181.0));
    }

    #[test]
    fn test_display() {
        let loc = GeoLocation::college_lasalle();
        assert_eq!(loc.to_string(), "45.491900, -73.579400");
    }

    #[test]
    fn test_distance_same_location() {
        let loc = GeoLocation::college_lasalle();
        assert!(loc.distance_meters(&loc).abs() < 0.001);
    }

    #[test]
    fn test_distance_montreal_to_quebec() {
        let montreal = GeoLocation::new(45.5017, -73.5673).expect("valid");
        let quebec = GeoLocation::new(46.8139, -71.2080).expect("valid");
        // Montréal to Québec City is roughly 233km as the crow flies
        assert!((montreal.distance_km(&quebec) - 233.0).abs() < 10.0);
    }

    #[test]
    fn test_degree_span_equator() {
        let loc = GeoLocation::new(0.0, 0.0).expect("valid");
        let (lat, lon) = loc.degree_span(111_320.0);
        assert!((lat - 1.0).abs() < 1e-9);
        assert!((lon - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_degree_span_widens_with_latitude() {
        let (lat, lon) = GeoLocation::college_lasalle().degree_span(2500.0);
        assert!(lon > lat);
    }

    #[test]
    fn test_degree_span_pole_is_capped() {
        let pole = GeoLocation::new(90.0, 0.0).expect("valid");
        let (_, lon) = pole.degree_span(1000.0);
        assert!((lon - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialization() {
        let loc = GeoLocation::new(45.50, -73.58).expect("valid");
        let json = serde_json::to_string(&loc).expect("serialize");
        assert!(json.contains("45.5"));
        assert!(json.contains("-73.58"));
    }
}
