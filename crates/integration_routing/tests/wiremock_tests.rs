//! Integration tests for the routing clients (wiremock-based)

use domain::value_objects::GeoLocation;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_routing::{
    GeocodingClient, HafasTransitClient, NominatimConfig, NominatimGeocodingClient, OsrmClient,
    OsrmConfig, RoadProfile, RoadRoutingClient, RoutingError, TransitClient, TransitConfig,
    Viewbox,
};

const HOME: GeoLocation = GeoLocation::new_unchecked(45.4919, -73.5794);
const CAFE: GeoLocation = GeoLocation::new_unchecked(45.4950, -73.5780);

fn viewbox() -> Viewbox {
    Viewbox::new(45.4694, -73.6115, 45.5144, -73.5473)
}

fn nominatim_for_mock(base_url: &str) -> NominatimConfig {
    NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    }
}

fn transit_for_mock(base_url: &str) -> TransitConfig {
    TransitConfig::for_testing(base_url)
}

const fn sample_places_json() -> &'static str {
    r#"[
        {"lat": "45.4950", "lon": "-73.5780", "name": "Café Myriade",
         "display_name": "Café Myriade, 1432 Rue Mackay, Montréal, Québec"},
        {"lat": "45.4970", "lon": "-73.5760", "name": "Café Santropol",
         "display_name": "Café Santropol, Montréal, Québec"}
    ]"#
}

const fn sample_route_json() -> &'static str {
    r#"{
        "code": "Ok",
        "routes": [{
            "distance": 1234.5,
            "duration": 300.0,
            "geometry": {
                "type": "LineString",
                "coordinates": [[-73.5794, 45.4919], [-73.5787, 45.4935], [-73.5780, 45.4950]]
            }
        }]
    }"#
}

const fn sample_journeys_json() -> &'static str {
    r#"{
        "journeys": [{
            "legs": [{
                "origin": {
                    "id": "1", "name": "Guy-Concordia",
                    "location": { "latitude": 45.4956, "longitude": -73.5794 }
                },
                "destination": {
                    "id": "2", "name": "Peel",
                    "location": { "latitude": 45.5010, "longitude": -73.5750 }
                },
                "departure": "2026-02-11T10:00:00+00:00",
                "arrival": "2026-02-11T10:04:00+00:00",
                "line": { "name": "1", "product": "subway" }
            }]
        }]
    }"#
}

// --- Nominatim ---

#[tokio::test]
async fn search_sends_bounded_viewbox() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "cafe"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("bounded", "1"))
        .and(query_param("viewbox", "-73.6115,45.5144,-73.5473,45.4694"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_places_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let places = client.search("cafe", &viewbox()).await.unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Café Myriade");
    assert_eq!(places[0].location, CAFE);
}

#[tokio::test]
async fn search_with_no_matches_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let places = client.search("zzzz", &viewbox()).await.unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn search_results_are_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_places_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        cache_ttl_hours: 1,
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();

    let first = client.search("Cafe", &viewbox()).await.unwrap();
    let second = client.search("cafe", &viewbox()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn search_blank_query_is_rejected_locally() {
    let server = MockServer::start().await;
    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();

    let err = client.search("   ", &viewbox()).await.unwrap_err();
    assert!(matches!(err, RoutingError::InvalidLocation(_)));
}

#[tokio::test]
async fn search_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.search("cafe", &viewbox()).await.unwrap_err();
    assert!(matches!(err, RoutingError::ServiceUnavailable(m) if m.contains("503")));
}

// --- OSRM ---

#[tokio::test]
async fn route_uses_profile_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bike/route/v1/cycling/-73.5794,45.4919;-73.578,45.495"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OsrmClient::new(&OsrmConfig::for_testing(&server.uri())).unwrap();
    let routes = client.route(HOME, CAFE, RoadProfile::Bike).await.unwrap();

    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].geometry.len(), 3);
    assert!((routes[0].duration_seconds - 300.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn route_no_route_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"code": "NoRoute", "message": "Impossible route"}"#),
        )
        .mount(&server)
        .await;

    let client = OsrmClient::new(&OsrmConfig::for_testing(&server.uri())).unwrap();
    let routes = client.route(HOME, CAFE, RoadProfile::Car).await.unwrap();
    assert!(routes.is_empty());
}

#[tokio::test]
async fn route_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = OsrmClient::new(&OsrmConfig::for_testing(&server.uri())).unwrap();
    let err = client.route(HOME, CAFE, RoadProfile::Foot).await.unwrap_err();
    assert!(matches!(
        err,
        RoutingError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn route_garbage_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>not here</html>"))
        .mount(&server)
        .await;

    let client = OsrmClient::new(&OsrmConfig::for_testing(&server.uri())).unwrap();
    let err = client.route(HOME, CAFE, RoadProfile::Car).await.unwrap_err();
    assert!(matches!(err, RoutingError::RequestFailed(m) if m.contains("404")));
}

// --- HAFAS ---

#[tokio::test]
async fn journeys_request_polylines() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/journeys"))
        .and(query_param("polylines", "true"))
        .and(query_param("results", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_journeys_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&transit_for_mock(&server.uri())).unwrap();
    let journeys = client.search_journeys(HOME, CAFE).await.unwrap();

    assert_eq!(journeys.len(), 1);
    assert_eq!(journeys[0].legs[0].origin.name, "Guy-Concordia");
    assert_eq!(journeys[0].duration_seconds(), 240);
}

#[tokio::test]
async fn journeys_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/journeys"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&transit_for_mock(&server.uri())).unwrap();
    let err = client.search_journeys(HOME, CAFE).await.unwrap_err();
    assert!(matches!(
        err,
        RoutingError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn journeys_send_coordinates_without_product_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/journeys"))
        .and(query_param("from.latitude", "45.4919"))
        .and(query_param("from.longitude", "-73.5794"))
        .and(query_param("to.latitude", "45.495"))
        .and(query_param("to.longitude", "-73.578"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"journeys": []}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&transit_for_mock(&server.uri())).unwrap();
    assert!(client.search_journeys(HOME, CAFE).await.unwrap().is_empty());

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default();
    assert!(!query.contains("nationalExpress"));
    assert!(!query.contains("suburban"));
}

#[tokio::test]
async fn journeys_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HafasTransitClient::new(&transit_for_mock(&server.uri())).unwrap();
    let err = client.search_journeys(HOME, CAFE).await.unwrap_err();
    assert!(matches!(err, RoutingError::RequestFailed(m) if m.contains("500")));
}
