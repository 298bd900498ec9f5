//! Routing integration for mapnav
//!
//! HTTP clients for the services behind place search and directions:
//!
//! - [`NominatimGeocodingClient`] resolves free-text queries with
//!   [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org), bounded to
//!   a [`Viewbox`]
//! - [`OsrmClient`] computes car, foot and bike routes with OSRM
//! - [`HafasTransitClient`] plans public transit journeys through a
//!   [transport.rest](https://transport.rest) compatible API for the home region
//!
//! Each client sits behind a trait ([`GeocodingClient`], [`RoadRoutingClient`],
//! [`TransitClient`]) so adapters can be tested without a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_routing::{OsrmClient, OsrmConfig, RoadProfile, RoadRoutingClient};
//!
//! let client = OsrmClient::new(&OsrmConfig::default())?;
//! let routes = client.route(origin, destination, RoadProfile::Bike).await?;
//! ```

mod config;
mod error;
mod geocoding;
mod hafas;
mod models;
mod osrm;

pub use config::{NominatimConfig, OsrmConfig, TransitConfig};
pub use error::RoutingError;
pub use geocoding::{GeocodingClient, NominatimGeocodingClient};
pub use hafas::{HafasTransitClient, TransitClient};
pub use models::{Journey, Leg, LineInfo, PlaceCandidate, RoadProfile, RoadRoute, Stop, Viewbox};
pub use osrm::{OsrmClient, RoadRoutingClient};
