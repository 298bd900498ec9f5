//! Read-only view of the orchestrator state for the presentation layer

use domain::entities::{Landmark, MapMarker, MarkerKind, Place, Route};
use domain::value_objects::{CameraState, GeoLocation, TransportMode};
use serde::Serialize;

/// Where the screen is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationPhase {
    /// Nothing searched yet
    Idle,
    /// A destination is set but no route has arrived
    DestinationSelected,
    /// A route to the destination is displayed
    Routed,
}

/// Everything a map view needs to render one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSnapshot {
    pub query: String,
    pub transport_mode: TransportMode,
    pub destination: Option<Place>,
    pub route: Option<Route>,
    pub error_message: Option<String>,
    pub camera: CameraState,
    pub zoom_distance: f64,
    pub distance_text: Option<String>,
    pub travel_time_text: Option<String>,
    pub user_location: Option<GeoLocation>,
    pub landmark: Landmark,
}

impl MapSnapshot {
    /// Current lifecycle phase
    #[must_use]
    pub const fn phase(&self) -> NavigationPhase {
        match (&self.destination, &self.route) {
            (None, _) => NavigationPhase::Idle,
            (Some(_), None) => NavigationPhase::DestinationSelected,
            (Some(_), Some(_)) => NavigationPhase::Routed,
        }
    }

    /// Pins to draw: landmark, then user, then destination
    #[must_use]
    pub fn markers(&self) -> Vec<MapMarker> {
        let mut markers = vec![MapMarker {
            label: self.landmark.name.clone(),
            location: self.landmark.location,
            kind: MarkerKind::Landmark,
        }];

        if let Some(location) = self.user_location {
            markers.push(MapMarker {
                label: "You".to_string(),
                location,
                kind: MarkerKind::User,
            });
        }

        if let Some(destination) = &self.destination {
            markers.push(MapMarker {
                label: "Destination".to_string(),
                location: destination.location,
                kind: MarkerKind::Destination,
            });
        }

        markers
    }

    /// "Dist: 12.35 km · Time: 13 min" once both values are known
    #[must_use]
    pub fn route_summary(&self) -> Option<String> {
        match (&self.distance_text, &self.travel_time_text) {
            (Some(dist), Some(time)) => Some(format!("Dist: {dist} km · Time: {time} min")),
            _ => None,
        }
    }
}
