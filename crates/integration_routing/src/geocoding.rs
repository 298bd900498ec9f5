//! Nominatim place search client
//!
//! Resolves free-text queries to places using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap),
//! restricted to a bounding box around the map's home location.
//!
//! Requests are throttled (Nominatim allows at most one request per second)
//! and results are cached to avoid repeating identical searches.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::config::NominatimConfig;
use crate::error::RoutingError;
use crate::models::{PlaceCandidate, Viewbox};

/// Trait for place search clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Find places matching `query` inside `viewbox`, best match first
    async fn search(
        &self,
        query: &str,
        viewbox: &Viewbox,
    ) -> Result<Vec<PlaceCandidate>, RoutingError>;
}

/// Nominatim-based search client with rate limiting and caching
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<String, Vec<PlaceCandidate>>>,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("mapnav/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(config.cache_ttl())
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Mutex::new(None),
        })
    }

    /// Enforce the minimum interval between requests
    async fn rate_limit(&self) {
        let min_interval = Duration::from_millis(self.config.min_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < min_interval {
                let wait = min_interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting place search");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn cache_key(query: &str, viewbox: &Viewbox) -> String {
        format!("{}|{}", query.to_lowercase(), viewbox.to_query_value())
    }

    /// Parse the raw Nominatim response, skipping entries with bad coordinates
    fn parse_search_response(body: &str) -> Result<Vec<PlaceCandidate>, RoutingError> {
        let raw: Vec<NominatimResult> =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;

        Ok(raw
            .into_iter()
            .filter_map(|result| {
                let location = result
                    .lat
                    .parse()
                    .ok()
                    .zip(result.lon.parse().ok())
                    .and_then(|(lat, lon)| GeoLocation::new(lat, lon).ok());
                let Some(location) = location else {
                    warn!(lat = %result.lat, lon = %result.lon, "Skipping result with invalid coordinates");
                    return None;
                };
                Some(PlaceCandidate {
                    name: result.short_name(),
                    display_name: result.display_name,
                    location,
                })
            })
            .collect())
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self, viewbox))]
    async fn search(
        &self,
        query: &str,
        viewbox: &Viewbox,
    ) -> Result<Vec<PlaceCandidate>, RoutingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RoutingError::InvalidLocation(
                "Search query must not be empty".to_string(),
            ));
        }

        let cache_key = Self::cache_key(query, viewbox);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&cache_key).await {
                debug!(%query, "Place search cache hit");
                return Ok(hit);
            }
        }

        self.rate_limit().await;

        let url = format!("{}/search", self.config.base_url);
        let params = [
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", self.config.result_limit.to_string()),
            ("viewbox", viewbox.to_query_value()),
            ("bounded", "1".to_string()),
            ("accept-language", self.config.accept_language.clone()),
        ];

        debug!(%query, "Searching places");

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

        let places = Self::parse_search_response(&body)?;
        debug!(%query, count = places.len(), "Places found");

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, places.clone()).await;
        }
        Ok(places)
    }
}

/// Raw Nominatim `jsonv2` search entry
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
    display_name: Option<String>,
}

impl NominatimResult {
    /// POI name, or the first component of the formatted address
    fn short_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| {
                self.display_name
                    .as_deref()
                    .and_then(|full| full.split(',').next())
            })
            .map_or_else(|| "Unnamed place".to_string(), |name| name.trim().to_string())
    }
}
