//! Routing service configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::RoadProfile;

/// Longest accepted place search cache lifetime (one year)
const MAX_CACHE_TTL_HOURS: u64 = 24 * 365;

/// Configuration for the Nominatim place search service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_nominatim_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_nominatim_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in hours (0 to disable)
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,

    /// Maximum number of candidates per search
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,

    /// Preferred result languages, sent as `accept-language`
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Minimum delay between two requests in milliseconds
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_nominatim_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_hours() -> u64 {
    24
}

const fn default_result_limit() -> u8 {
    5
}

fn default_accept_language() -> String {
    "fr,en".to_string()
}

const fn default_min_interval_ms() -> u64 {
    1100
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_nominatim_base_url(),
            timeout_secs: default_nominatim_timeout_secs(),
            cache_ttl_hours: default_cache_ttl_hours(),
            result_limit: default_result_limit(),
            accept_language: default_accept_language(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_hours: 0,
            min_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_hours > 0
    }

    /// Cache entry lifetime, capped at one year
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours.min(MAX_CACHE_TTL_HOURS) * 3600)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("nominatim.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("nominatim.timeout_secs must be greater than 0".to_string());
        }
        if !(1..=50).contains(&self.result_limit) {
            return Err("nominatim.result_limit must be between 1 and 50".to_string());
        }
        if self.cache_ttl_hours > MAX_CACHE_TTL_HOURS {
            return Err(format!(
                "nominatim.cache_ttl_hours must be {MAX_CACHE_TTL_HOURS} or less"
            ));
        }
        Ok(())
    }
}

/// Configuration for OSRM road routing
///
/// OSRM serves one profile per instance, so each profile has its own base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Instance serving the car profile
    #[serde(default = "default_car_url")]
    pub car_url: String,

    /// Instance serving the foot profile
    #[serde(default = "default_foot_url")]
    pub foot_url: String,

    /// Instance serving the bike profile
    #[serde(default = "default_bike_url")]
    pub bike_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_osrm_timeout_secs")]
    pub timeout_secs: u64,

    /// Ask for alternative routes
    #[serde(default)]
    pub alternatives: bool,
}

fn default_car_url() -> String {
    "https://routing.openstreetmap.de/routed-car".to_string()
}

fn default_foot_url() -> String {
    "https://routing.openstreetmap.de/routed-foot".to_string()
}

fn default_bike_url() -> String {
    "https://routing.openstreetmap.de/routed-bike".to_string()
}

const fn default_osrm_timeout_secs() -> u64 {
    10
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            car_url: default_car_url(),
            foot_url: default_foot_url(),
            bike_url: default_bike_url(),
            timeout_secs: default_osrm_timeout_secs(),
            alternatives: false,
        }
    }
}

impl OsrmConfig {
    /// Create a configuration pointing every profile at one server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            car_url: format!("{base_url}/car"),
            foot_url: format!("{base_url}/foot"),
            bike_url: format!("{base_url}/bike"),
            timeout_secs: 5,
            alternatives: false,
        }
    }

    /// Base URL of the instance serving `profile`
    #[must_use]
    pub fn base_url(&self, profile: RoadProfile) -> &str {
        match profile {
            RoadProfile::Car => &self.car_url,
            RoadProfile::Foot => &self.foot_url,
            RoadProfile::Bike => &self.bike_url,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [
            ("car_url", &self.car_url),
            ("foot_url", &self.foot_url),
            ("bike_url", &self.bike_url),
        ] {
            if url.is_empty() {
                return Err(format!("osrm.{name} must not be empty"));
            }
        }
        if self.timeout_secs == 0 {
            return Err("osrm.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Configuration for the public transit service (transport.rest / HAFAS)
///
/// transport.rest instances are regional, so there is no default endpoint:
/// transit routing stays disabled until `base_url` points at an instance
/// covering the home region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL of a transport.rest compatible API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Connection timeout in seconds
    #[serde(default = "default_transit_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of journey results to return
    #[serde(default = "default_max_results")]
    pub max_results: u8,
}

const fn default_transit_timeout_secs() -> u64 {
    10
}

const fn default_max_results() -> u8 {
    1
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_transit_timeout_secs(),
            max_results: default_max_results(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration pointing at `base_url`, suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: Some(base_url.to_string()),
            timeout_secs: 5,
            max_results: 2,
        }
    }

    /// Whether a transit endpoint is configured
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.as_deref().is_some_and(str::is_empty) {
            return Err("transit.base_url must not be empty when set".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("transit.timeout_secs must be greater than 0".to_string());
        }

        if self.max_results == 0 {
            return Err("transit.max_results must be greater than 0".to_string());
        }

        if self.max_results > 10 {
            return Err("transit.max_results must be 10 or less".to_string());
        }

        Ok(())
    }
}
