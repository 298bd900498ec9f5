//! Landmark and map marker entities

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// Fixed named location shown on the map at all times
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub location: GeoLocation,
}

impl Landmark {
    #[must_use]
    pub fn new(name: impl Into<String>, location: GeoLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self::new("Collège LaSalle", GeoLocation::college_lasalle())
    }
}

/// What a marker stands for; renderers pick the tint from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Landmark,
    User,
    Destination,
}

impl MarkerKind {
    /// Marker tint name
    #[must_use]
    pub const fn tint(&self) -> &'static str {
        match self {
            Self::Landmark => "red",
            Self::User => "blue",
            Self::Destination => "green",
        }
    }
}

/// A pin to draw on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub label: String,
    pub location: GeoLocation,
    pub kind: MarkerKind,
}
