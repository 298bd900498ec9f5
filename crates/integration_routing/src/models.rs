//! Routing data models
//!
//! Typed representations of place candidates, road routes and transit
//! journeys as returned by Nominatim, OSRM and transport.rest.

use std::fmt;

use chrono::{DateTime, Utc};
use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};

/// A place matched by free-text search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Short name (POI name, or first address component)
    pub name: String,
    /// Full formatted address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Position of the place
    pub location: GeoLocation,
}

/// Geographic bounding box a place search is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewbox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Viewbox {
    #[must_use]
    pub const fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Nominatim `viewbox` parameter: `<west>,<north>,<east>,<south>`
    #[must_use]
    pub fn to_query_value(&self) -> String {
        format!("{},{},{},{}", self.west, self.north, self.east, self.south)
    }
}

/// A road, foot or bike route computed by OSRM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadRoute {
    /// Route length in meters
    pub distance_meters: f64,
    /// Expected travel time in seconds
    pub duration_seconds: f64,
    /// Full route geometry, start to end
    pub geometry: Vec<GeoLocation>,
}

/// Road network profile served by an OSRM instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadProfile {
    Car,
    Foot,
    Bike,
}

impl fmt::Display for RoadProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Car => write!(f, "car"),
            Self::Foot => write!(f, "foot"),
            Self::Bike => write!(f, "bike"),
        }
    }
}

/// A complete transit journey from origin to destination, consisting of one or more legs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Journey {
    /// Individual legs (segments) of the journey
    pub legs: Vec<Leg>,
}

impl Journey {
    /// Total travel time from first departure to last arrival, in seconds
    #[must_use]
    pub fn duration_seconds(&self) -> i64 {
        let (Some(first), Some(last)) = (self.legs.first(), self.legs.last()) else {
            return 0;
        };
        (last.arrival - first.departure).num_seconds().max(0)
    }

    /// Travelled distance in meters, summed over legs
    #[must_use]
    pub fn distance_meters(&self) -> f64 {
        self.legs.iter().map(Leg::distance_meters).sum()
    }

    /// Number of transfers (vehicle legs - 1, walking legs excluded)
    #[must_use]
    pub fn transfers(&self) -> u8 {
        let transport_legs = self.legs.iter().filter(|leg| !leg.walking).count();
        transport_legs.saturating_sub(1) as u8
    }

    /// Concatenated leg geometry, falling back to stop positions
    #[must_use]
    pub fn path(&self) -> Vec<GeoLocation> {
        let mut path: Vec<GeoLocation> = Vec::new();
        for leg in &self.legs {
            for point in leg.path() {
                if path.last() != Some(&point) {
                    path.push(point);
                }
            }
        }
        path
    }
}

/// A single leg (segment) of a journey
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Leg {
    /// Origin stop
    pub origin: Stop,
    /// Destination stop
    pub destination: Stop,
    /// Actual departure time (includes delay)
    pub departure: DateTime<Utc>,
    /// Actual arrival time (includes delay)
    pub arrival: DateTime<Utc>,
    /// Line information (None for walking legs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineInfo>,
    /// Whether this is a walking transfer leg
    #[serde(default)]
    pub walking: bool,
    /// Walking distance in meters (only reported for walking legs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    /// Leg geometry when polylines were requested
    #[serde(default)]
    pub polyline: Vec<GeoLocation>,
}

impl Leg {
    /// Points of this leg: its polyline, or origin and destination stops
    #[must_use]
    pub fn path(&self) -> Vec<GeoLocation> {
        if self.polyline.len() >= 2 {
            return self.polyline.clone();
        }
        [self.origin.location, self.destination.location]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Leg length in meters
    ///
    /// Uses the reported walking distance when present, otherwise the
    /// length of the leg path.
    #[must_use]
    pub fn distance_meters(&self) -> f64 {
        if let Some(distance) = self.distance {
            return f64::from(distance);
        }
        self.path()
            .windows(2)
            .map(|pair| pair[0].distance_meters(&pair[1]))
            .sum()
    }
}

/// A transit stop (station, bus stop, etc.)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    /// Unique stop identifier
    pub id: String,
    /// Human-readable stop name
    pub name: String,
    /// Stop position, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Information about a transit line (train, bus, etc.)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineInfo {
    /// Display name (e.g., "S5", "Bus 248")
    pub name: String,
    /// Product type from HAFAS (e.g., "suburban", "bus")
    pub product: String,
}
