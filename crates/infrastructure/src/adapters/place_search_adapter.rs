//! Place search adapter - Implements PlaceSearchPort using Nominatim

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{PlaceSearchPort, SearchRegion};
use async_trait::async_trait;
use domain::entities::Place;
use integration_routing::{GeocodingClient, PlaceCandidate, Viewbox};
use tracing::{debug, instrument};

use super::map_routing_error;

/// Adapter for place search via a geocoding client
pub struct NominatimPlaceSearchAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for NominatimPlaceSearchAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimPlaceSearchAdapter")
            .field("client", &"GeocodingClient")
            .finish()
    }
}

impl NominatimPlaceSearchAdapter {
    #[must_use]
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    fn viewbox(region: &SearchRegion) -> Viewbox {
        let (south, west, north, east) = region.bounding_box();
        Viewbox::new(south, west, north, east)
    }

    fn convert_candidate(candidate: PlaceCandidate) -> Place {
        let place = Place::new(candidate.name, candidate.location);
        match candidate.display_name {
            Some(address) => place.with_address(address),
            None => place,
        }
    }
}

#[async_trait]
impl PlaceSearchPort for NominatimPlaceSearchAdapter {
    #[instrument(skip(self, region))]
    async fn search(
        &self,
        query: &str,
        region: &SearchRegion,
    ) -> Result<Vec<Place>, ApplicationError> {
        let candidates = self
            .client
            .search(query, &Self::viewbox(region))
            .await
            .map_err(|e| map_routing_error("Place search", e))?;

        let places: Vec<Place> = candidates
            .into_iter()
            .map(Self::convert_candidate)
            .collect();
        debug!(count = places.len(), "Places converted");
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use domain::value_objects::GeoLocation;
    use integration_routing::RoutingError;
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct FakeGeocoder {
        viewboxes: Mutex<Vec<Viewbox>>,
        fail: bool,
    }

    #[async_trait]
    impl GeocodingClient for FakeGeocoder {
        async fn search(
            &self,
            query: &str,
            viewbox: &Viewbox,
        ) -> Result<Vec<PlaceCandidate>, RoutingError> {
            self.viewboxes.lock().push(*viewbox);
            if self.fail {
                return Err(RoutingError::RateLimitExceeded {
                    retry_after_secs: None,
                });
            }
            Ok(vec![
                PlaceCandidate {
                    name: query.to_string(),
                    display_name: Some(format!("{query}, Montréal")),
                    location: GeoLocation::new_unchecked(45.495, -73.578),
                },
                PlaceCandidate {
                    name: "Bare".to_string(),
                    display_name: None,
                    location: GeoLocation::new_unchecked(45.49, -73.57),
                },
            ])
        }
    }

    fn region() -> SearchRegion {
        SearchRegion::new(GeoLocation::college_lasalle(), 2500.0)
    }

    #[tokio::test]
    async fn converts_candidates_in_order() {
        let adapter = NominatimPlaceSearchAdapter::new(Arc::new(FakeGeocoder::default()));
        let places = adapter.search("Café Myriade", &region()).await.unwrap();

        assert_eq!(places.len(), 2);
        assert_eq!(places[0].name, "Café Myriade");
        assert_eq!(places[0].address.as_deref(), Some("Café Myriade, Montréal"));
        assert!(places[1].address.is_none());
    }

    #[tokio::test]
    async fn viewbox_matches_region() {
        let geocoder = Arc::new(FakeGeocoder::default());
        let adapter = NominatimPlaceSearchAdapter::new(geocoder.clone());
        adapter.search("cafe", &region()).await.unwrap();

        let viewbox = geocoder.viewboxes.lock()[0];
        let (south, west, north, east) = region().bounding_box();
        assert_eq!(viewbox, Viewbox::new(south, west, north, east));
        assert!(viewbox.south < 45.4919 && viewbox.north > 45.4919);
    }

    #[tokio::test]
    async fn rate_limit_maps_to_application_error() {
        let geocoder = FakeGeocoder {
            fail: true,
            ..Default::default()
        };
        let adapter = NominatimPlaceSearchAdapter::new(Arc::new(geocoder));
        let err = adapter.search("cafe", &region()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::RateLimited));
    }
}
