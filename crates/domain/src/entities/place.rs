//! Place entity - a search result that can become the destination

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::GeoLocation;

/// A resolved place returned by place search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name
    pub name: String,
    /// Position of the place
    pub location: GeoLocation,
    /// Full address or description, when the service provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Place {
    /// Create a place without address
    #[must_use]
    pub fn new(name: impl Into<String>, location: GeoLocation) -> Self {
        Self {
            name: name.into(),
            location,
            address: None,
        }
    }

    /// Attach an address line
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            Some(address) if address != &self.name => {
                write!(f, "{} ({address}) @ {}", self.name, self.location)
            },
            _ => write!(f, "{} @ {}", self.name, self.location),
        }
    }
}
