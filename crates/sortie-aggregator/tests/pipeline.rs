//! End-to-end pipeline tests against wiremock-backed providers.

use sortie_aggregator::{AggregateError, Aggregator, PlacesQuery};
use sortie_core::{AppConfig, Coordinate, Environment, SourceKind};
use sortie_sources::SourceError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: (f64, f64) = (48.8566, 2.3522);

fn test_config(base: &str) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: "127.0.0.1:0".parse().expect("bind addr"),
        log_level: "info".to_string(),
        overpass_base_url: format!("{base}/overpass"),
        opendata_base_url: base.to_string(),
        geoapify_base_url: base.to_string(),
        geoapify_api_key: "test-key".to_string(),
        search_area: "Paris".to_string(),
        search_center: Coordinate {
            lat: 48.8566,
            lng: 2.3522,
        },
        search_radius_m: 5000,
        source_limit: 10,
        http_timeout_secs: 5,
        user_agent: "sortie-tests/0.1".to_string(),
    }
}

fn aggregator(server: &MockServer) -> Aggregator {
    Aggregator::from_config(&test_config(&server.uri())).expect("aggregator")
}

fn query(category: Option<&str>, max_distance: Option<f64>) -> PlacesQuery {
    PlacesQuery {
        lat: Some(USER.0),
        lng: Some(USER.1),
        max_distance,
        category: category.map(ToOwned::to_owned),
    }
}

async fn mount_overpass(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/overpass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

async fn mount_opendata(server: &MockServer, dataset: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/catalog/datasets/{dataset}/records")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

async fn mount_geoapify(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn merges_sources_in_declaration_order_and_drops_cross_source_duplicates() {
    let server = MockServer::start().await;

    mount_overpass(
        &server,
        serde_json::json!({
            "elements": [
                { "id": 1, "lat": 48.8566, "lon": 2.3522, "tags": { "name": "Chez A" } }
            ]
        }),
    )
    .await;
    mount_opendata(
        &server,
        "restaurants-casvp",
        serde_json::json!({
            "records": [
                // Same coordinates as the overpass node: dropped by dedup.
                { "record": { "id": "rec-1", "fields": {
                    "nom_restaurant": "Chez A bis",
                    "tt": { "lat": 48.8566, "lon": 2.3522 }
                } } },
                { "record": { "id": "rec-2", "fields": {
                    "nom_restaurant": "Le B",
                    "tt": { "lat": 48.8600, "lon": 2.3500 }
                } } }
            ]
        }),
    )
    .await;
    mount_geoapify(
        &server,
        serde_json::json!({
            "features": [
                { "geometry": { "coordinates": [2.3400, 48.8500] },
                  "properties": { "place_id": "geo-1", "name": "Le C" } },
                // No geometry: transformed but dropped by the distance filter.
                { "properties": { "place_id": "geo-2", "name": "Sans position" } }
            ]
        }),
    )
    .await;

    let places = aggregator(&server)
        .fetch_places(&query(Some("restaurant"), None))
        .await
        .expect("aggregation should succeed");

    let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1", "rec-2", "geo-1"]);

    // First-seen-wins: the surviving record at the shared coordinates is
    // the overpass one, with all of its fields.
    assert_eq!(places[0].source, SourceKind::Overpass);
    assert_eq!(places[0].title, "Chez A");
    assert_eq!(places[1].source, SourceKind::Opendata);
    assert_eq!(places[2].source, SourceKind::Geoapify);
}

#[tokio::test]
async fn distance_filter_keeps_near_and_drops_far_places() {
    let server = MockServer::start().await;

    mount_overpass(
        &server,
        serde_json::json!({
            "elements": [
                { "id": 10, "lat": 48.8600, "lon": 2.3500, "tags": { "name": "Proche" } },
                { "id": 11, "lat": 48.9000, "lon": 2.4000, "tags": { "name": "Loin" } }
            ]
        }),
    )
    .await;
    mount_opendata(&server, "restaurants-casvp", serde_json::json!({ "records": [] })).await;
    mount_geoapify(&server, serde_json::json!({ "features": [] })).await;

    let places = aggregator(&server)
        .fetch_places(&query(Some("restaurant"), Some(1000.0)))
        .await
        .expect("aggregation should succeed");

    let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["10"]);
}

#[tokio::test]
async fn event_category_only_contacts_the_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/overpass"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;
    mount_opendata(
        &server,
        "que-faire-a-paris-",
        serde_json::json!({
            "records": [
                { "record": { "id": "evt-1", "fields": {
                    "titre": "Nuit Blanche",
                    "descriptif": "Parcours artistique nocturne",
                    "tt": { "lat": 48.8566, "lon": 2.3522 }
                } } }
            ]
        }),
    )
    .await;

    let places = aggregator(&server)
        .fetch_places(&query(Some("Event"), None))
        .await
        .expect("aggregation should succeed");

    assert_eq!(places.len(), 1);
    assert_eq!(places[0].title, "Nuit Blanche");
    assert_eq!(places[0].description, "Parcours artistique nocturne");
    assert_eq!(places[0].category, "Événement");
    assert_eq!(places[0].source, SourceKind::Opendata);
}

#[tokio::test]
async fn default_category_is_restaurant() {
    let server = MockServer::start().await;

    mount_overpass(&server, serde_json::json!({ "elements": [] })).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/catalog/datasets/restaurants-casvp/records"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "records": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_geoapify(&server, serde_json::json!({ "features": [] })).await;

    let places = aggregator(&server)
        .fetch_places(&query(None, None))
        .await
        .expect("aggregation should succeed");
    assert!(places.is_empty());
}

#[tokio::test]
async fn one_failing_source_fails_the_whole_aggregation() {
    let server = MockServer::start().await;

    mount_overpass(&server, serde_json::json!({ "elements": [] })).await;
    mount_opendata(&server, "bars-de-paris", serde_json::json!({ "records": [] })).await;
    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = aggregator(&server)
        .fetch_places(&query(Some("bar"), None))
        .await;

    assert!(
        matches!(
            result,
            Err(AggregateError::Source(SourceError::Http(_)))
        ),
        "got {result:?}"
    );
}

#[tokio::test]
async fn missing_coordinates_never_contact_a_provider() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = aggregator(&server)
        .fetch_places(&PlacesQuery {
            lat: Some(USER.0),
            lng: None,
            max_distance: None,
            category: None,
        })
        .await;

    assert!(
        matches!(result, Err(AggregateError::MissingCoordinates)),
        "got {result:?}"
    );
}

#[tokio::test]
async fn unknown_category_is_rejected_with_its_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = aggregator(&server)
        .fetch_places(&query(Some("Museum"), None))
        .await;

    match result {
        Err(AggregateError::UnsupportedCategory(name)) => assert_eq!(name, "museum"),
        other => panic!("expected UnsupportedCategory, got {other:?}"),
    }
}
