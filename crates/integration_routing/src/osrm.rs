//! OSRM road routing client
//!
//! Computes car, foot and bike routes with the OSRM `route` service. Each
//! profile is served by its own instance, see [`OsrmConfig`].

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::OsrmConfig;
use crate::error::RoutingError;
use crate::models::{RoadProfile, RoadRoute};

/// Trait for road routing clients
#[async_trait]
pub trait RoadRoutingClient: Send + Sync {
    /// Routes from `origin` to `destination`, best first
    ///
    /// An empty list means the service found no connection.
    async fn route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
        profile: RoadProfile,
    ) -> Result<Vec<RoadRoute>, RoutingError>;
}

/// OSRM HTTP client
#[derive(Debug)]
pub struct OsrmClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmClient {
    /// Create a new OSRM client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("mapnav/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Profile segment of the request path
    const fn profile_segment(profile: RoadProfile) -> &'static str {
        match profile {
            RoadProfile::Car => "driving",
            RoadProfile::Foot => "walking",
            RoadProfile::Bike => "cycling",
        }
    }

    fn route_url(&self, origin: GeoLocation, destination: GeoLocation, profile: RoadProfile) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.config.base_url(profile).trim_end_matches('/'),
            Self::profile_segment(profile),
            origin.longitude(),
            origin.latitude(),
            destination.longitude(),
            destination.latitude(),
        )
    }

    /// Parse an OSRM `route` response body
    fn parse_route_response(body: &str) -> Result<Vec<RoadRoute>, RoutingError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;

        match raw.code.as_str() {
            "Ok" => {},
            "NoRoute" | "NoSegment" => {
                debug!(code = %raw.code, "OSRM found no route");
                return Ok(Vec::new());
            },
            "InvalidValue" | "InvalidQuery" => {
                return Err(RoutingError::InvalidLocation(
                    raw.message.unwrap_or(raw.code),
                ));
            },
            _ => {
                return Err(RoutingError::RequestFailed(format!(
                    "{}: {}",
                    raw.code,
                    raw.message.unwrap_or_default()
                )));
            },
        }

        raw.routes
            .into_iter()
            .map(|route| {
                let geometry = route
                    .geometry
                    .coordinates
                    .into_iter()
                    .map(|[lon, lat]| {
                        GeoLocation::new(lat, lon)
                            .map_err(|e| RoutingError::ParseError(e.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(RoadRoute {
                    distance_meters: route.distance,
                    duration_seconds: route.duration,
                    geometry,
                })
            })
            .collect()
    }
}

#[async_trait]
impl RoadRoutingClient for OsrmClient {
    #[instrument(skip(self), fields(from = %origin, to = %destination))]
    async fn route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
        profile: RoadProfile,
    ) -> Result<Vec<RoadRoute>, RoutingError> {
        let url = self.route_url(origin, destination, profile);
        let params = [
            ("overview", "full"),
            ("geometries", "geojson"),
            ("steps", "false"),
            ("alternatives", if self.config.alternatives { "true" } else { "false" }),
        ];

        debug!(%url, %profile, "Requesting road route");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| RoutingError::from_reqwest(&e, self.config.timeout_secs))?;

        // OSRM reports NoRoute and bad input as 400 with a JSON body
        let status = response.status();
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::from_status(&response));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let routes = Self::parse_route_response(&body).map_err(|e| {
            if status.is_success() {
                e
            } else {
                warn!(%status, error = %e, "Unexpected OSRM error response");
                RoutingError::RequestFailed(format!("HTTP {status}"))
            }
        })?;

        debug!(count = routes.len(), "Road routes found");
        Ok(routes)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    distance: f64,
    duration: f64,
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    coordinates: Vec<[f64; 2]>,
}
