//! Route orchestrator
//!
//! Owns the map screen state and drives the search → directions → camera
//! workflow. Each operation is an `async fn` on `&self`, so a shared
//! `Arc<RouteOrchestrator>` can be handed to spawned tasks and callbacks may
//! complete in any order.
//!
//! Every search and every route request takes a number from its own sequence
//! counter. A response is applied only if no newer request of the same kind
//! was issued meanwhile; otherwise it is dropped as superseded.

mod config;
mod snapshot;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::entities::{Place, Route};
use domain::value_objects::{CameraState, GeoLocation, TransportMode};
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

pub use config::OrchestratorConfig;
pub use snapshot::{MapSnapshot, NavigationPhase};

use crate::error::NavigationError;
use crate::ports::{DirectionsPort, DirectionsRequest, LocationPort, PlaceSearchPort};

/// Factor applied by the zoom-in button
pub const ZOOM_IN_FACTOR: f64 = 0.5;

/// Factor applied by the zoom-out button
pub const ZOOM_OUT_FACTOR: f64 = 1.5;

/// What an operation did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    /// The state was updated with a successful result
    Applied,
    /// The request failed; the error state was updated
    Failed,
    /// A newer request of the same kind was issued; the result was dropped
    Superseded,
    /// Nothing to do; no request was issued
    Skipped,
}

#[derive(Debug)]
struct MapState {
    query: String,
    transport_mode: TransportMode,
    destination: Option<Place>,
    route: Option<Route>,
    distance_text: Option<String>,
    travel_time_text: Option<String>,
    error: Option<NavigationError>,
    camera: CameraState,
    zoom_distance: f64,
    pivot: GeoLocation,
    user_location: Option<GeoLocation>,
}

impl MapState {
    fn initial(config: &OrchestratorConfig) -> Self {
        Self {
            query: String::new(),
            transport_mode: TransportMode::default(),
            destination: None,
            route: None,
            distance_text: None,
            travel_time_text: None,
            error: None,
            camera: CameraState::Centered {
                center: config.home,
                distance_meters: config.initial_zoom_distance,
            },
            zoom_distance: config.initial_zoom_distance,
            pivot: config.home,
            user_location: None,
        }
    }
}

/// Coordinates place search, routing and camera framing for the map screen
pub struct RouteOrchestrator {
    search_port: Arc<dyn PlaceSearchPort>,
    directions_port: Arc<dyn DirectionsPort>,
    location_port: Option<Arc<dyn LocationPort>>,
    config: OrchestratorConfig,
    state: RwLock<MapState>,
    search_seq: AtomicU64,
    route_seq: AtomicU64,
}

impl std::fmt::Debug for RouteOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteOrchestrator")
            .field("config", &self.config)
            .field("has_location", &self.location_port.is_some())
            .field("search_seq", &self.search_seq.load(Ordering::Relaxed))
            .field("route_seq", &self.route_seq.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl RouteOrchestrator {
    /// Create an orchestrator with the camera centered on home
    #[must_use]
    pub fn new(
        search_port: Arc<dyn PlaceSearchPort>,
        directions_port: Arc<dyn DirectionsPort>,
        config: OrchestratorConfig,
    ) -> Self {
        let state = RwLock::new(MapState::initial(&config));
        Self {
            search_port,
            directions_port,
            location_port: None,
            config,
            state,
            search_seq: AtomicU64::new(0),
            route_seq: AtomicU64::new(0),
        }
    }

    /// Attach a live location source for the user marker
    #[must_use]
    pub fn with_location(mut self, location_port: Arc<dyn LocationPort>) -> Self {
        self.location_port = Some(location_port);
        self
    }

    /// Orchestrator configuration
    #[must_use]
    pub const fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Update the search text without searching
    pub fn set_query(&self, text: impl Into<String>) {
        self.state.write().query = text.into();
    }

    /// Search for the stored query text
    pub async fn submit_search(&self) -> OperationOutcome {
        let query = self.state.read().query.clone();
        self.search(&query).await
    }

    /// Search for a destination and route to the best match
    ///
    /// Blank queries are skipped without contacting the service. On a match
    /// the destination is replaced, the error cleared and a route requested.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> OperationOutcome {
        let query = query.trim();
        if query.is_empty() {
            debug!("Ignoring blank search query");
            return OperationOutcome::Skipped;
        }

        self.state.write().query = query.to_string();
        let seq = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let region = self.config.search_region();

        debug!(seq, %query, "Searching places");
        let result = self.search_port.search(query, &region).await;

        {
            let mut state = self.state.write();
            if self.search_seq.load(Ordering::SeqCst) != seq {
                debug!(seq, "Discarding superseded search result");
                return OperationOutcome::Superseded;
            }

            match result {
                Ok(places) => {
                    let Some(place) = places.into_iter().next() else {
                        info!(%query, "No places matched");
                        state.error = Some(NavigationError::NoResultsFound);
                        return OperationOutcome::Failed;
                    };
                    info!(%query, destination = %place, "Destination selected");
                    state.destination = Some(place);
                    state.error = None;
                    // Routes still in flight target the previous destination
                    self.route_seq.fetch_add(1, Ordering::SeqCst);
                },
                Err(e) => {
                    warn!(%query, error = %e, "Place search failed");
                    state.error = Some(NavigationError::SearchFailed(e.to_string()));
                    return OperationOutcome::Failed;
                },
            }
        }

        let route_outcome = self.recompute_route().await;
        debug!(?route_outcome, "Route requested for new destination");
        OperationOutcome::Applied
    }

    /// Select a transport mode, rerouting when a destination is set
    ///
    /// Selecting the mode that is already active does nothing. The current
    /// route stays visible until the new one arrives.
    #[instrument(skip(self))]
    pub async fn set_transport_mode(&self, mode: TransportMode) -> OperationOutcome {
        let has_destination = {
            let mut state = self.state.write();
            if state.transport_mode == mode {
                return OperationOutcome::Skipped;
            }
            state.transport_mode = mode;
            state.destination.is_some()
        };

        if !has_destination {
            debug!(%mode, "Mode changed without destination");
            return OperationOutcome::Skipped;
        }

        self.recompute_route().await
    }

    /// Request a route from home to the current destination
    ///
    /// On success the route, distance and time texts are replaced and the
    /// camera frames the padded route bounds. On failure the previous route
    /// stays in place and the error is recorded.
    #[instrument(skip(self))]
    pub async fn recompute_route(&self) -> OperationOutcome {
        let request = {
            let state = self.state.read();
            let Some(destination) = &state.destination else {
                debug!("No destination, skipping route");
                return OperationOutcome::Skipped;
            };
            DirectionsRequest::new(
                self.config.home,
                destination.location,
                state.transport_mode.routing_profile(),
            )
        };

        let seq = self.route_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, %request, "Requesting route");
        let result = self.directions_port.routes(&request).await;

        let mut state = self.state.write();
        if self.route_seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "Discarding superseded route result");
            return OperationOutcome::Superseded;
        }

        match result {
            Ok(routes) => {
                let Some(route) = routes.into_iter().next() else {
                    warn!(%request, "Directions returned no route");
                    state.error = Some(NavigationError::NoRouteFound);
                    return OperationOutcome::Failed;
                };
                let distance = route.distance_text();
                let time = route.travel_time_text();
                info!(%request, km = %distance, minutes = %time, "Route ready");

                state.camera = CameraState::Framed(route.framing(self.config.route_padding));
                state.distance_text = Some(distance);
                state.travel_time_text = Some(time);
                state.route = Some(route);
                state.error = None;
                OperationOutcome::Applied
            },
            Err(e) => {
                warn!(%request, error = %e, "Route request failed");
                state.error = Some(NavigationError::RouteFailed(e.to_string()));
                OperationOutcome::Failed
            },
        }
    }

    /// Multiply the camera distance and recenter on the last panned position
    ///
    /// Factors below 1 zoom in, above 1 zoom out. The result is clamped to
    /// the configured bounds; non-positive or non-finite factors are ignored.
    pub fn zoom(&self, factor: f64) -> OperationOutcome {
        if !factor.is_finite() || factor <= 0.0 {
            warn!(factor, "Ignoring invalid zoom factor");
            return OperationOutcome::Skipped;
        }

        let mut state = self.state.write();
        let distance = (state.zoom_distance * factor)
            .clamp(self.config.min_zoom_distance, self.config.max_zoom_distance);
        state.zoom_distance = distance;
        state.camera = CameraState::Centered {
            center: state.pivot,
            distance_meters: distance,
        };
        debug!(factor, distance, "Zoomed");
        OperationOutcome::Applied
    }

    /// Zoom in by [`ZOOM_IN_FACTOR`]
    pub fn zoom_in(&self) -> OperationOutcome {
        self.zoom(ZOOM_IN_FACTOR)
    }

    /// Zoom out by [`ZOOM_OUT_FACTOR`]
    pub fn zoom_out(&self) -> OperationOutcome {
        self.zoom(ZOOM_OUT_FACTOR)
    }

    /// Record the map center reported by the view after a pan
    pub fn on_camera_panned(&self, center: GeoLocation) {
        self.state.write().pivot = center;
    }

    /// Record a pushed location fix, used when no location port is attached
    pub fn on_user_location(&self, location: GeoLocation) {
        self.state.write().user_location = Some(location);
    }

    /// Selected transport mode
    #[must_use]
    pub fn transport_mode(&self) -> TransportMode {
        self.state.read().transport_mode
    }

    /// Current error message, if the last operation failed
    #[must_use]
    pub fn error(&self) -> Option<NavigationError> {
        self.state.read().error.clone()
    }

    /// Copy of everything the view renders
    #[must_use]
    pub fn snapshot(&self) -> MapSnapshot {
        let live_location = self
            .location_port
            .as_ref()
            .and_then(|port| port.current_location());

        let state = self.state.read();
        MapSnapshot {
            query: state.query.clone(),
            transport_mode: state.transport_mode,
            destination: state.destination.clone(),
            route: state.route.clone(),
            error_message: state.error.as_ref().map(ToString::to_string),
            camera: state.camera,
            zoom_distance: state.zoom_distance,
            distance_text: state.distance_text.clone(),
            travel_time_text: state.travel_time_text.clone(),
            user_location: live_location.or(state.user_location),
            landmark: self.config.landmark(),
        }
    }
}
