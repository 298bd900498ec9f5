//! Map camera value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{GeoLocation, MapRect};

/// Current map viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraState {
    /// Looking down at `center` from `distance_meters` above it
    Centered {
        center: GeoLocation,
        distance_meters: f64,
    },
    /// Showing exactly this projected rectangle
    Framed(MapRect),
}

impl CameraState {
    /// Center of the viewport regardless of framing
    #[must_use]
    pub fn center(&self) -> GeoLocation {
        match self {
            Self::Centered { center, .. } => *center,
            Self::Framed(rect) => rect.center().to_location(),
        }
    }

    /// Whether the camera currently frames a rectangle
    #[must_use]
    pub const fn is_framed(&self) -> bool {
        matches!(self, Self::Framed(_))
    }
}

impl fmt::Display for CameraState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Centered {
                center,
                distance_meters,
            } => write!(f, "centered on {center} at {distance_meters:.0}m"),
            Self::Framed(rect) => write!(
                f,
                "framing {:.0}x{:.0} pts around {}",
                rect.size.width,
                rect.size.height,
                rect.center().to_location()
            ),
        }
    }
}
