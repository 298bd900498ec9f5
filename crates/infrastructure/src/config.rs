//! Application configuration
//!
//! Values come from built-in defaults, then an optional TOML file
//! (`config.toml` in the working directory, or an explicit path), then
//! `MAPNAV_` environment variables. Nested keys use a double underscore:
//! `MAPNAV_OSRM__TIMEOUT_SECS=5` sets `osrm.timeout_secs`.

use std::path::Path;

use application::OrchestratorConfig;
use domain::value_objects::GeoLocation;
use integration_routing::{NominatimConfig, OsrmConfig, TransitConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::telemetry::LoggingConfig;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// An HTTP client could not be built from its section
    #[error("Failed to initialize client: {0}")]
    ClientInit(#[from] integration_routing::RoutingError),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Map screen settings
    #[serde(default)]
    pub map: MapConfig,

    /// Place search service
    #[serde(default)]
    pub nominatim: NominatimConfig,

    /// Road routing service
    #[serde(default)]
    pub osrm: OsrmConfig,

    /// Public transit service
    #[serde(default)]
    pub transit: TransitConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Map screen settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Latitude of the home location (route origin, landmark)
    #[serde(default = "default_home_latitude")]
    pub home_latitude: f64,

    /// Longitude of the home location
    #[serde(default = "default_home_longitude")]
    pub home_longitude: f64,

    /// Label of the landmark marker
    #[serde(default = "default_landmark_name")]
    pub landmark_name: String,

    /// Searches are limited to this distance around home
    #[serde(default = "default_search_radius_meters")]
    pub search_radius_meters: f64,

    #[serde(default = "default_initial_zoom_distance")]
    pub initial_zoom_distance: f64,

    #[serde(default = "default_min_zoom_distance")]
    pub min_zoom_distance: f64,

    #[serde(default = "default_max_zoom_distance")]
    pub max_zoom_distance: f64,

    /// Margin around a framed route, in map points
    #[serde(default = "default_route_padding")]
    pub route_padding: f64,
}

const fn default_home_latitude() -> f64 {
    GeoLocation::college_lasalle().latitude()
}

const fn default_home_longitude() -> f64 {
    GeoLocation::college_lasalle().longitude()
}

fn default_landmark_name() -> String {
    OrchestratorConfig::default().landmark_name
}

const fn default_search_radius_meters() -> f64 {
    2500.0
}

const fn default_initial_zoom_distance() -> f64 {
    2000.0
}

const fn default_min_zoom_distance() -> f64 {
    100.0
}

const fn default_max_zoom_distance() -> f64 {
    40_000_000.0
}

const fn default_route_padding() -> f64 {
    300.0
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            home_latitude: default_home_latitude(),
            home_longitude: default_home_longitude(),
            landmark_name: default_landmark_name(),
            search_radius_meters: default_search_radius_meters(),
            initial_zoom_distance: default_initial_zoom_distance(),
            min_zoom_distance: default_min_zoom_distance(),
            max_zoom_distance: default_max_zoom_distance(),
            route_padding: default_route_padding(),
        }
    }
}

impl MapConfig {
    /// Build and validate the orchestrator settings
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for out-of-range coordinates or zoom settings.
    pub fn orchestrator_config(&self) -> Result<OrchestratorConfig, ConfigError> {
        let home = GeoLocation::new(self.home_latitude, self.home_longitude)
            .map_err(|e| ConfigError::Invalid(format!("map.home: {e}")))?;

        let config = OrchestratorConfig {
            home,
            landmark_name: self.landmark_name.clone(),
            search_radius_meters: self.search_radius_meters,
            initial_zoom_distance: self.initial_zoom_distance,
            min_zoom_distance: self.min_zoom_distance,
            max_zoom_distance: self.max_zoom_distance,
            route_padding: self.route_padding,
        };
        config
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("map: {e}")))?;
        Ok(config)
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and environment
    ///
    /// Without `path`, `config.toml` in the working directory is used when present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if an explicit file is missing or any source
    /// fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_environment(path, environment())
    }

    fn load_with_environment(
        path: Option<&Path>,
        environment: config::Environment,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.map.orchestrator_config()?;
        self.nominatim.validate().map_err(ConfigError::Invalid)?;
        self.osrm.validate().map_err(ConfigError::Invalid)?;
        self.transit.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

/// `MAPNAV_` environment source
fn environment() -> config::Environment {
    config::Environment::with_prefix("MAPNAV")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
