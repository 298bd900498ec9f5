//! Directions adapter - Implements DirectionsPort using OSRM and HAFAS
//!
//! Car, foot and bike requests go to OSRM; transit requests go to the
//! transport.rest journey planner when one is configured.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{DirectionsPort, DirectionsRequest};
use async_trait::async_trait;
use domain::entities::Route;
use domain::value_objects::RoutingProfile;
use integration_routing::{Journey, RoadProfile, RoadRoute, RoadRoutingClient, TransitClient};
use tracing::{debug, instrument, warn};

use super::map_routing_error;

/// Adapter dispatching route requests by profile
pub struct RoutingDirectionsAdapter {
    road_client: Arc<dyn RoadRoutingClient>,
    transit_client: Option<Arc<dyn TransitClient>>,
}

impl std::fmt::Debug for RoutingDirectionsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingDirectionsAdapter")
            .field("road_client", &"RoadRoutingClient")
            .field("has_transit", &self.transit_client.is_some())
            .finish()
    }
}

impl RoutingDirectionsAdapter {
    /// Adapter routing road profiles only; transit requests fail
    #[must_use]
    pub fn new(road_client: Arc<dyn RoadRoutingClient>) -> Self {
        Self {
            road_client,
            transit_client: None,
        }
    }

    /// Route transit requests through `transit_client`
    #[must_use]
    pub fn with_transit(mut self, transit_client: Arc<dyn TransitClient>) -> Self {
        self.transit_client = Some(transit_client);
        self
    }

    /// OSRM profile for a routing profile; `None` for transit
    const fn road_profile(profile: RoutingProfile) -> Option<RoadProfile> {
        match profile {
            RoutingProfile::Automobile => Some(RoadProfile::Car),
            RoutingProfile::Walking => Some(RoadProfile::Foot),
            RoutingProfile::Cycling => Some(RoadProfile::Bike),
            RoutingProfile::Transit => None,
        }
    }

    fn convert_road_route(route: RoadRoute, profile: RoutingProfile) -> Option<Route> {
        Route::new(
            route.geometry,
            route.distance_meters,
            route.duration_seconds,
            profile,
        )
        .map_err(|e| warn!(error = %e, "Dropping invalid road route"))
        .ok()
    }

    #[allow(clippy::cast_precision_loss)]
    fn convert_journey(journey: &Journey) -> Option<Route> {
        Route::new(
            journey.path(),
            journey.distance_meters(),
            journey.duration_seconds() as f64,
            RoutingProfile::Transit,
        )
        .map_err(|e| warn!(error = %e, "Dropping journey without geometry"))
        .ok()
    }
}

#[async_trait]
impl DirectionsPort for RoutingDirectionsAdapter {
    #[instrument(skip(self), fields(request = %request))]
    async fn routes(&self, request: &DirectionsRequest) -> Result<Vec<Route>, ApplicationError> {
        let routes: Vec<Route> = match Self::road_profile(request.profile) {
            Some(road_profile) => self
                .road_client
                .route(request.origin, request.destination, road_profile)
                .await
                .map_err(|e| map_routing_error("Directions", e))?
                .into_iter()
                .filter_map(|route| Self::convert_road_route(route, request.profile))
                .collect(),
            None => self
                .transit_client
                .as_ref()
                .ok_or_else(|| {
                    warn!("Transit requested but no transit service is configured");
                    ApplicationError::Configuration("transit.base_url is not set".to_string())
                })?
                .search_journeys(request.origin, request.destination)
                .await
                .map_err(|e| map_routing_error("Transit directions", e))?
                .iter()
                .filter_map(Self::convert_journey)
                .collect(),
        };

        debug!(count = routes.len(), "Routes converted");
        Ok(routes)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use domain::value_objects::GeoLocation;
    use integration_routing::{Leg, RoutingError, Stop};
    use parking_lot::Mutex;

    use super::*;

    const HOME: GeoLocation = GeoLocation::new_unchecked(45.4919, -73.5794);
    const CAFE: GeoLocation = GeoLocation::new_unchecked(45.4950, -73.5780);

    #[derive(Default)]
    struct FakeRoad {
        profiles: Mutex<Vec<RoadProfile>>,
        routes: Vec<RoadRoute>,
    }

    #[async_trait]
    impl RoadRoutingClient for FakeRoad {
        async fn route(
            &self,
            _origin: GeoLocation,
            _destination: GeoLocation,
            profile: RoadProfile,
        ) -> Result<Vec<RoadRoute>, RoutingError> {
            self.profiles.lock().push(profile);
            Ok(self.routes.clone())
        }
    }

    #[derive(Default)]
    struct FakeTransit {
        calls: Mutex<u32>,
        journeys: Vec<Journey>,
        fail: bool,
    }

    #[async_trait]
    impl TransitClient for FakeTransit {
        async fn search_journeys(
            &self,
            _origin: GeoLocation,
            _destination: GeoLocation,
        ) -> Result<Vec<Journey>, RoutingError> {
            *self.calls.lock() += 1;
            if self.fail {
                return Err(RoutingError::Timeout { timeout_secs: 10 });
            }
            Ok(self.journeys.clone())
        }
    }

    fn road_route() -> RoadRoute {
        RoadRoute {
            distance_meters: 12345.0,
            duration_seconds: 754.0,
            geometry: vec![HOME, CAFE],
        }
    }

    fn journey() -> Journey {
        let stop = |name: &str, location| Stop {
            id: name.to_string(),
            name: name.to_string(),
            location: Some(location),
        };
        Journey {
            legs: vec![Leg {
                origin: stop("Home", HOME),
                destination: stop("Cafe", CAFE),
                departure: Utc.with_ymd_and_hms(2026, 2, 11, 10, 0, 0).unwrap(),
                arrival: Utc.with_ymd_and_hms(2026, 2, 11, 10, 12, 0).unwrap(),
                line: None,
                walking: false,
                distance: None,
                polyline: vec![],
            }],
        }
    }

    fn adapter(road: Arc<FakeRoad>, transit: Arc<FakeTransit>) -> RoutingDirectionsAdapter {
        RoutingDirectionsAdapter::new(road).with_transit(transit)
    }

    #[tokio::test]
    async fn road_profiles_dispatch_to_osrm() {
        let road = Arc::new(FakeRoad {
            routes: vec![road_route()],
            ..Default::default()
        });
        let transit = Arc::new(FakeTransit::default());
        let adapter = adapter(road.clone(), transit.clone());

        for profile in [
            RoutingProfile::Automobile,
            RoutingProfile::Walking,
            RoutingProfile::Cycling,
        ] {
            let routes = adapter
                .routes(&DirectionsRequest::new(HOME, CAFE, profile))
                .await
                .unwrap();
            assert_eq!(routes.len(), 1);
            assert_eq!(routes[0].profile(), profile);
            assert_eq!(routes[0].distance_text(), "12.35");
        }

        assert_eq!(
            *road.profiles.lock(),
            [RoadProfile::Car, RoadProfile::Foot, RoadProfile::Bike]
        );
        assert_eq!(*transit.calls.lock(), 0);
    }

    #[tokio::test]
    async fn transit_dispatches_to_hafas() {
        let road = Arc::new(FakeRoad::default());
        let transit = Arc::new(FakeTransit {
            journeys: vec![journey()],
            ..Default::default()
        });
        let adapter = adapter(road.clone(), transit.clone());

        let routes = adapter
            .routes(&DirectionsRequest::new(HOME, CAFE, RoutingProfile::Transit))
            .await
            .unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].profile(), RoutingProfile::Transit);
        assert_eq!(routes[0].travel_time_text(), "12");
        assert_eq!(routes[0].polyline(), [HOME, CAFE]);
        assert!(road.profiles.lock().is_empty());
    }

    #[tokio::test]
    async fn journey_without_geometry_is_dropped() {
        let mut empty = journey();
        empty.legs[0].origin.location = None;
        empty.legs[0].destination.location = None;

        let transit = Arc::new(FakeTransit {
            journeys: vec![empty, journey()],
            ..Default::default()
        });
        let adapter = adapter(Arc::new(FakeRoad::default()), transit);

        let routes = adapter
            .routes(&DirectionsRequest::new(HOME, CAFE, RoutingProfile::Transit))
            .await
            .unwrap();
        assert_eq!(routes.len(), 1);
    }

    #[tokio::test]
    async fn no_route_is_empty_list() {
        let adapter = adapter(Arc::new(FakeRoad::default()), Arc::new(FakeTransit::default()));
        let routes = adapter
            .routes(&DirectionsRequest::new(HOME, CAFE, RoutingProfile::Automobile))
            .await
            .unwrap();
        assert!(routes.is_empty());
    }

    #[tokio::test]
    async fn transit_failure_is_external_service_error() {
        let transit = Arc::new(FakeTransit {
            fail: true,
            ..Default::default()
        });
        let adapter = adapter(Arc::new(FakeRoad::default()), transit);
        let err = adapter
            .routes(&DirectionsRequest::new(HOME, CAFE, RoutingProfile::Transit))
            .await
            .unwrap_err();

        assert!(matches!(&err, ApplicationError::ExternalService(m) if m.contains("timed out")));
    }

    #[tokio::test]
    async fn transit_without_service_is_configuration_error() {
        let road = Arc::new(FakeRoad {
            routes: vec![road_route()],
            ..Default::default()
        });
        let adapter = RoutingDirectionsAdapter::new(road.clone());

        let err = adapter
            .routes(&DirectionsRequest::new(HOME, CAFE, RoutingProfile::Transit))
            .await
            .unwrap_err();
        assert!(matches!(&err, ApplicationError::Configuration(m) if m.contains("transit.base_url")));
        assert!(road.profiles.lock().is_empty());

        // Road profiles keep working
        let routes = adapter
            .routes(&DirectionsRequest::new(HOME, CAFE, RoutingProfile::Walking))
            .await
            .unwrap();
        assert_eq!(routes.len(), 1);
    }
}
