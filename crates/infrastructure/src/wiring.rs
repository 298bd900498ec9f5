//! Assembles the orchestrator from configuration

use std::sync::Arc;

use application::RouteOrchestrator;
use integration_routing::{HafasTransitClient, NominatimGeocodingClient, OsrmClient};
use tracing::{info, warn};

use crate::adapters::{
    LocationPublisher, NominatimPlaceSearchAdapter, RoutingDirectionsAdapter, location_channel,
};
use crate::config::{AppConfig, ConfigError};

/// A ready orchestrator plus the handle that feeds it location fixes
#[derive(Debug)]
pub struct MapServices {
    pub orchestrator: Arc<RouteOrchestrator>,
    pub location: LocationPublisher,
}

/// Validate `config`, build the HTTP clients and wire the adapters
///
/// # Errors
///
/// Returns `ConfigError::Invalid` for invalid settings and
/// `ConfigError::ClientInit` if an HTTP client cannot be created.
pub fn build_map_services(config: &AppConfig) -> Result<MapServices, ConfigError> {
    config.validate()?;
    let orchestrator_config = config.map.orchestrator_config()?;

    let geocoder = Arc::new(NominatimGeocodingClient::new(&config.nominatim)?);
    let road = Arc::new(OsrmClient::new(&config.osrm)?);

    let mut directions = RoutingDirectionsAdapter::new(road);
    if config.transit.is_enabled() {
        directions = directions.with_transit(Arc::new(HafasTransitClient::new(&config.transit)?));
    } else {
        warn!("transit.base_url is not set; transit routing is disabled");
    }

    let search = Arc::new(NominatimPlaceSearchAdapter::new(geocoder));
    let directions = Arc::new(directions);
    let (publisher, provider) = location_channel();

    let orchestrator = RouteOrchestrator::new(search, directions, orchestrator_config)
        .with_location(Arc::new(provider));

    info!(
        home = %config.map.landmark_name,
        nominatim = %config.nominatim.base_url,
        transit = config.transit.base_url.as_deref().unwrap_or("disabled"),
        "Map services ready"
    );

    Ok(MapServices {
        orchestrator: Arc::new(orchestrator),
        location: publisher,
    })
}
