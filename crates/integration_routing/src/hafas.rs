//! HAFAS transit client via the transport.rest API
//!
//! Plans public transit journeys between two coordinates, including the
//! geometry of each leg, using a [transport.rest](https://transport.rest)
//! compatible endpoint for the home region.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::value_objects::GeoLocation;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::TransitConfig;
use crate::error::RoutingError;
use crate::models::{Journey, Leg, LineInfo, Stop};

/// Trait for transit service clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Search for journeys leaving now between two locations, best first
    async fn search_journeys(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<Vec<Journey>, RoutingError>;
}

/// HAFAS-based transit client using the transport.rest API
#[derive(Debug)]
pub struct HafasTransitClient {
    client: Client,
    base_url: String,
    config: TransitConfig,
}

impl HafasTransitClient {
    /// Create a new HAFAS transit client
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::ConfigurationError` when no base URL is set and
    /// an error if the HTTP client cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, RoutingError> {
        let base_url = config
            .base_url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                RoutingError::ConfigurationError("transit.base_url is not set".to_string())
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("mapnav/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            config: config.clone(),
        })
    }

    /// Parse the raw HAFAS JSON journey response into typed models
    fn parse_journeys_response(body: &str) -> Result<Vec<Journey>, RoutingError> {
        let raw: RawJourneysResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;

        raw.journeys.into_iter().map(Self::convert_journey).collect()
    }

    fn convert_journey(raw: RawJourney) -> Result<Journey, RoutingError> {
        let legs = raw
            .legs
            .into_iter()
            .map(Self::convert_leg)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Journey { legs })
    }

    /// Convert a raw leg; legs without times cannot be placed in a journey
    fn convert_leg(raw: RawLeg) -> Result<Leg, RoutingError> {
        let departure = raw
            .departure
            .or(raw.planned_departure)
            .ok_or_else(|| RoutingError::ParseError("Leg without departure time".to_string()))?;
        let arrival = raw
            .arrival
            .or(raw.planned_arrival)
            .ok_or_else(|| RoutingError::ParseError("Leg without arrival time".to_string()))?;

        let polyline = raw
            .polyline
            .map(|collection| {
                collection
                    .features
                    .into_iter()
                    .filter_map(|feature| {
                        let [lon, lat] = feature.geometry.coordinates;
                        GeoLocation::new(lat, lon).ok()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Leg {
            origin: Self::convert_stop(raw.origin),
            destination: Self::convert_stop(raw.destination),
            departure,
            arrival,
            line: raw.line.map(Self::convert_line),
            walking: raw.walking.unwrap_or(false),
            distance: raw.distance,
            polyline,
        })
    }

    fn convert_stop(raw: RawStop) -> Stop {
        Stop {
            id: raw.id.unwrap_or_default(),
            name: raw.name.or(raw.address).unwrap_or_default(),
            location: raw
                .location
                .and_then(|loc| GeoLocation::new(loc.latitude, loc.longitude).ok()),
        }
    }

    fn convert_line(raw: RawLine) -> LineInfo {
        LineInfo {
            name: raw.name.unwrap_or_default(),
            product: raw.product.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl TransitClient for HafasTransitClient {
    #[instrument(skip(self), fields(from = %origin, to = %destination))]
    async fn search_journeys(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<Vec<Journey>, RoutingError> {
        let url = format!("{}/journeys", self.base_url);

        let params = [
            ("from.latitude", origin.latitude().to_string()),
            ("from.longitude", origin.longitude().to_string()),
            ("from.address", origin.to_string()),
            ("to.latitude", destination.latitude().to_string()),
            ("to.longitude", destination.longitude().to_string()),
            ("to.address", destination.to_string()),
            ("results", self.config.max_results.to_string()),
            ("polylines", "true".to_string()),
            ("stopovers", "false".to_string()),
            ("remarks", "false".to_string()),
        ];

        debug!(%url, "Searching journeys");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| RoutingError::from_reqwest(&e, self.config.timeout_secs))?;

        if !response.status().is_success() {
            return Err(RoutingError::from_status(&response));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let journeys = Self::parse_journeys_response(&body)?;

        if journeys.is_empty() {
            warn!("No journeys found");
        }

        debug!(count = journeys.len(), "Journeys found");
        Ok(journeys)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawJourneysResponse {
    journeys: Vec<RawJourney>,
}

#[derive(Debug, Deserialize)]
struct RawJourney {
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeg {
    origin: RawStop,
    destination: RawStop,
    departure: Option<DateTime<Utc>>,
    planned_departure: Option<DateTime<Utc>>,
    arrival: Option<DateTime<Utc>>,
    planned_arrival: Option<DateTime<Utc>>,
    line: Option<RawLine>,
    walking: Option<bool>,
    distance: Option<u32>,
    polyline: Option<RawFeatureCollection>,
}

#[derive(Debug, Deserialize)]
struct RawStop {
    id: Option<String>,
    name: Option<String>,
    address: Option<String>,
    location: Option<RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    name: Option<String>,
    product: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: RawPoint,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    coordinates: [f64; 2],
}
