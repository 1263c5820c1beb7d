//! HTTP-level tests for the Nautobot client using wiremock
//!
//! These verify URL shapes, headers, query parameters and status handling
//! against a local mock server.

use nautobot_client::{
    Device, Location, NautobotClient, NautobotConfig, NautobotError, RackGroup, Resource,
};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "0123456789abcdef";

fn client_for(server: &MockServer) -> NautobotClient {
    let config = NautobotConfig::new(format!("{}/api", server.uri()), TOKEN);
    NautobotClient::new(&config).expect("client")
}

#[tokio::test]
async fn test_list_sends_token_and_json_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/rack-groups/"))
        .and(header("Authorization", format!("Token {TOKEN}").as_str()))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                {"id": "rg-1", "display": "Row A", "rack_count": 3, "location": {"id": "loc-1", "object_type": "dcim.location"}},
                {"id": "rg-2", "display": "Row B", "rack_count": 0, "parent": {"id": "rg-1", "object_type": "dcim.rackgroup"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let groups = client_for(&server).list::<RackGroup>(&[]).await.expect("list");

    assert_eq!(groups.len(), 2);
    let first = groups.get("rg-1").expect("rg-1");
    assert_eq!(first.display.as_deref(), Some("Row A"));
    assert_eq!(first.location.as_ref().map(|l| l.id.as_str()), Some("loc-1"));
    let second = groups.get("rg-2").expect("rg-2");
    assert_eq!(second.parent.as_ref().map(|p| p.id()), Some("rg-1"));
}

#[tokio::test]
async fn test_get_by_id_uses_item_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/racks/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "name": "RackA",
            "device_count": 5,
            "location": {"id": "10", "object_type": "site"},
            "facility_id": "R-01"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rack = client_for(&server).get_rack("1").await.expect("get");

    assert_eq!(rack.id, "1");
    assert_eq!(rack.name.as_deref(), Some("RackA"));
    assert_eq!(rack.device_count, Some(5));
    let location = rack.location.as_ref().expect("location");
    assert_eq!(location.id, "10");
    assert_eq!(location.object_type.as_deref(), Some("site"));
    assert_eq!(rack.get_extra("facility_id"), Some(&json!("R-01")));
}

#[tokio::test]
async fn test_query_params_are_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .and(query_param("location", "DC 1"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "d-1", "name": "leaf01", "interface_count": 52}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client_for(&server)
        .query_devices(&[("location", "DC 1"), ("status", "active")])
        .await
        .expect("list");

    assert_eq!(devices.len(), 1);
    let device: &Device = devices.get("d-1").expect("d-1");
    assert_eq!(device.interface_count, Some(52));
}

#[tokio::test]
async fn test_only_first_page_is_read() {
    let server = MockServer::start().await;
    let next = format!("{}/api/dcim/locations/?limit=1&offset=1", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/dcim/locations/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": next,
            "results": [{"id": "loc-1", "object_type": "dcim.location"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let locations = client_for(&server).query_locations(&[]).await.expect("list");
    assert_eq!(locations.keys().collect::<Vec<_>>(), vec!["loc-1"]);
}

#[tokio::test]
async fn test_404_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let err = client_for(&server).get_device("missing").await.expect_err("404");
    assert!(matches!(err, NautobotError::NotFound(_)));
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_403_maps_to_authentication() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/racks/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "Invalid token"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).query_racks(&[]).await.expect_err("403");
    assert!(matches!(err, NautobotError::Authentication { .. }));
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
}

#[tokio::test]
async fn test_500_carries_body_context() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/rack-groups/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).query_rack_groups(&[]).await.expect_err("500");
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    let message = err.to_string();
    assert!(message.contains("database unavailable"), "{message}");
    assert!(message.contains("/api/dcim/rack-groups/"), "{message}");
}

#[tokio::test]
async fn test_invalid_json_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/locations/x/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_location("x").await.expect_err("html body");
    assert!(matches!(err, NautobotError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_generic_endpoint_access() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/manufacturers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": "m-1", "name": "Arista"}]
        })))
        .mount(&server)
        .await;

    let manufacturers = client_for(&server)
        .list_objects("dcim/manufacturers", &[])
        .await
        .expect("list");
    let arista = manufacturers.get("m-1").expect("m-1");
    assert_eq!(arista.endpoint(), "dcim/manufacturers");
    assert_eq!(arista.get_extra("name"), Some(&json!("Arista")));
}

#[tokio::test]
async fn test_typed_get_with_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/locations/loc-9/"))
        .and(query_param("depth", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "loc-9",
            "object_type": "dcim.location",
            "name": "Cage 9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let location: Location = client_for(&server)
        .get("loc-9", &[("depth", "1")])
        .await
        .expect("get");
    assert_eq!(location.get_extra("name"), Some(&json!("Cage 9")));
    assert_eq!(location.endpoint(), "dcim/locations");
}
