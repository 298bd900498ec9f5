//! Transport mode value object
//!
//! The user-facing travel mode and the routing profile it selects
//! on the directions service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Travel mode selectable on the map screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Car
    #[default]
    Automobile,
    /// Public transit
    Transit,
    /// On foot
    Walking,
    /// Bicycle
    Cycling,
}

/// Routing-service identifier for a travel mode
///
/// Opaque to the orchestrator; adapters translate it to service parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProfile {
    /// Road network for cars
    Automobile,
    /// Public transit journeys
    Transit,
    /// Pedestrian network
    Walking,
    /// Bicycle network
    Cycling,
}

impl TransportMode {
    /// Every mode in picker order
    pub const ALL: [Self; 4] = [Self::Automobile, Self::Transit, Self::Walking, Self::Cycling];

    /// Routing profile requested from the directions service
    #[must_use]
    pub const fn routing_profile(self) -> RoutingProfile {
        match self {
            Self::Automobile => RoutingProfile::Automobile,
            Self::Transit => RoutingProfile::Transit,
            Self::Walking => RoutingProfile::Walking,
            Self::Cycling => RoutingProfile::Cycling,
        }
    }

    /// Short label shown in the mode picker
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Automobile => "Auto",
            Self::Transit => "Transit",
            Self::Walking => "Walk",
            Self::Cycling => "Cycle",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TransportMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "automobile" | "car" | "drive" => Ok(Self::Automobile),
            "transit" | "public" => Ok(Self::Transit),
            "walk" | "walking" | "foot" => Ok(Self::Walking),
            "cycle" | "cycling" | "bike" => Ok(Self::Cycling),
            _ => Err(DomainError::UnknownTransportMode(s.to_string())),
        }
    }
}

impl RoutingProfile {
    /// Stable identifier used in logs and configuration keys
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Automobile => "automobile",
            Self::Transit => "transit",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn default_mode_is_automobile() {
        assert_eq!(TransportMode::default(), TransportMode::Automobile);
    }

    #[test]
    fn every_mode_has_its_own_profile() {
        let profiles: HashSet<RoutingProfile> = TransportMode::ALL
            .iter()
            .map(|m| m.routing_profile())
            .collect();
        assert_eq!(profiles.len(), TransportMode::ALL.len());
    }

    #[test]
    fn cycling_does_not_route_as_walking() {
        assert_eq!(
            TransportMode::Cycling.routing_profile(),
            RoutingProfile::Cycling
        );
        assert_ne!(
            TransportMode::Cycling.routing_profile(),
            TransportMode::Walking.routing_profile()
        );
    }

    #[test]
    fn labels_match_picker() {
        let labels: Vec<&str> = TransportMode::ALL.iter().map(TransportMode::label).collect();
        assert_eq!(labels, ["Auto", "Transit", "Walk", "Cycle"]);
    }

    #[test]
    fn parse_aliases() {
        assert_eq!("auto".parse::<TransportMode>().unwrap(), TransportMode::Automobile);
        assert_eq!("Transit".parse::<TransportMode>().unwrap(), TransportMode::Transit);
        assert_eq!(" walk ".parse::<TransportMode>().unwrap(), TransportMode::Walking);
        assert_eq!("BIKE".parse::<TransportMode>().unwrap(), TransportMode::Cycling);
    }

    #[test]
    fn parse_unknown_mode_fails() {
        let err = "hovercraft".parse::<TransportMode>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownTransportMode(_)));
    }

    #[test]
    fn profile_serializes_lowercase() {
        let json = serde_json::to_string(&RoutingProfile::Transit).unwrap();
        assert_eq!(json, "\"transit\"");
        assert_eq!(RoutingProfile::Cycling.to_string(), "cycling");
    }
}
