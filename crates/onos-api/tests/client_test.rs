#![allow(clippy::unwrap_used)]
// Integration tests for `OnosClient` using wiremock.

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use onos_api::{
    ApiResponse, Credentials, Error, FetchPolicy, HttpMethod, OnosClient, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(policy: FetchPolicy) -> (MockServer, OnosClient) {
    let server = MockServer::start().await;
    let addr = server.address();
    let client = OnosClient::new(
        &addr.ip().to_string(),
        &addr.port().to_string(),
        Credentials::default(),
        &TransportConfig::default(),
        policy,
    )
    .unwrap();
    (server, client)
}

/// A client pointed at a port nothing listens on. Binding an ephemeral
/// port and dropping the listener yields a port that refuses connects.
fn unreachable_client(policy: FetchPolicy) -> OnosClient {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    OnosClient::new(
        "127.0.0.1",
        &port.to_string(),
        Credentials::default(),
        &TransportConfig::default(),
        policy,
    )
    .unwrap()
}

fn devices_body() -> Value {
    json!({
        "devices": [{
            "id": "of:0000000000000001",
            "type": "SWITCH",
            "available": true,
            "role": "MASTER",
            "mfr": "Nicira, Inc.",
            "hw": "Open vSwitch",
            "sw": "2.17.0",
            "serial": "None",
            "driver": "ovs",
            "chassisId": "1"
        }]
    })
}

// ── Typed accessors ─────────────────────────────────────────────────

#[tokio::test]
async fn devices_unwraps_array_and_stamps_freshness() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    Mock::given(method("GET"))
        .and(path("/onos/v1/devices"))
        .and(header("Authorization", "Basic b25vczpyb2Nrcw=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(devices_body()))
        .mount(&server)
        .await;

    let resp = client.devices().await.unwrap();

    assert!(resp.success);
    assert_eq!(resp.data.len(), 1);
    assert_eq!(resp.data[0].id, "of:0000000000000001");
    assert!(resp.data[0].available);
    assert!(resp.data[0].last_update.is_some(), "freshness not stamped");
    assert!(resp.data[0].last_update_text.is_some());
}

#[tokio::test]
async fn devices_missing_array_is_empty() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    Mock::given(method("GET"))
        .and(path("/onos/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let resp = client.devices().await.unwrap();
    assert!(resp.success);
    assert!(resp.data.is_empty());
}

#[tokio::test]
async fn single_device_hits_id_path() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    Mock::given(method("GET"))
        .and(path("/onos/v1/devices/of:0000000000000001"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "of:0000000000000001", "available": true })),
        )
        .mount(&server)
        .await;

    let resp = client.device("of:0000000000000001").await.unwrap();
    assert!(resp.success);
    assert_eq!(resp.data.id, "of:0000000000000001");
    assert!(resp.data.last_update.is_some());
}

#[tokio::test]
async fn flows_scoped_by_device() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    Mock::given(method("GET"))
        .and(path("/onos/v1/flows/of:0000000000000002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "flows": [{ "id": "42", "deviceId": "of:0000000000000002", "state": "ADDED" }]
        })))
        .mount(&server)
        .await;

    let resp = client.flows(Some("of:0000000000000002")).await.unwrap();
    assert_eq!(resp.data.len(), 1);
    assert_eq!(resp.data[0].device_id, "of:0000000000000002");
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn strict_policy_propagates_http_errors() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    Mock::given(method("GET"))
        .and(path("/onos/v1/devices"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.devices().await;
    assert!(
        matches!(result, Err(Error::Status { status: 500, .. })),
        "expected Status error, got: {result:?}"
    );
}

#[tokio::test]
async fn demo_fallback_serves_two_canned_devices() {
    // No network at all: connect refused on every call.
    let client = unreachable_client(FetchPolicy::DemoFallback);

    let resp = client.devices().await.unwrap();

    assert!(!resp.success);
    assert!(resp.error.is_some());
    assert_eq!(resp.data.len(), 2, "demo device array must have 2 entries");
    assert!(resp.data[0].last_update.is_some());
}

#[tokio::test]
async fn demo_fallback_single_device_matches_by_id() {
    let client = unreachable_client(FetchPolicy::DemoFallback);

    let resp = client.device("of:0000000000000002").await.unwrap();
    assert!(!resp.success);
    assert_eq!(resp.data.id, "of:0000000000000002");

    // Unknown id defaults to the first demo record.
    let resp = client.device("of:ffffffffffffffff").await.unwrap();
    assert_eq!(resp.data.id, "of:0000000000000001");
}

#[tokio::test]
async fn strict_policy_propagates_network_errors() {
    let client = unreachable_client(FetchPolicy::Strict);
    let result = client.devices().await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn test_connection_never_errors() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    Mock::given(method("GET"))
        .and(path("/onos/v1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "node": "onos-1" })))
        .mount(&server)
        .await;

    let ok = client.test_connection().await;
    assert!(ok.success);

    let down = unreachable_client(FetchPolicy::Strict);
    let failed: ApiResponse<Value> = down.test_connection().await;
    assert!(!failed.success);
    assert!(failed.error.unwrap().contains("ONOS controller"));
}

// ── Passthrough accessor ────────────────────────────────────────────

#[tokio::test]
async fn custom_request_substitutes_placeholders() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    Mock::given(method("GET"))
        .and(path("/onos/v1/devices/of:1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "of:1" })))
        .expect(1)
        .mount(&server)
        .await;

    let params = [("deviceId".to_owned(), "of:1".to_owned())]
        .into_iter()
        .collect();
    let resp = client
        .custom(HttpMethod::Get, "/devices/{deviceId}", None, Some(&params))
        .await
        .unwrap();

    assert!(resp.success);
    assert_eq!(resp.data["id"], "of:1");
}

#[tokio::test]
async fn custom_request_posts_json_body() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    Mock::given(method("POST"))
        .and(path("/onos/v1/flows/of:1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "created": true })))
        .mount(&server)
        .await;

    let body = json!({ "priority": 40000 });
    let resp = client
        .custom(HttpMethod::Post, "/flows/of:1", Some(&body), None)
        .await
        .unwrap();
    assert!(resp.success);
}

#[tokio::test]
async fn patch_is_rejected_before_dispatch() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    let result = client.custom(HttpMethod::Patch, "/devices", None, None).await;
    assert!(
        matches!(result, Err(Error::UnsupportedMethod(ref m)) if m == "PATCH"),
        "expected UnsupportedMethod, got: {result:?}"
    );

    // Nothing must have been dispatched. Rejection also applies under
    // demo fallback.
    assert!(server.received_requests().await.unwrap().is_empty());
    let fallback = unreachable_client(FetchPolicy::DemoFallback);
    let result = fallback.custom(HttpMethod::Patch, "/devices", None, None).await;
    assert!(matches!(result, Err(Error::UnsupportedMethod(_))));
}

#[tokio::test]
async fn non_json_body_kept_as_raw_text() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    Mock::given(method("GET"))
        .and(path("/onos/v1/diagnostics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text, not json"))
        .mount(&server)
        .await;

    let resp = client
        .custom(HttpMethod::Get, "/diagnostics", None, None)
        .await
        .unwrap();
    assert!(resp.success);
    assert_eq!(resp.data, Value::String("plain text, not json".into()));
}

#[tokio::test]
async fn custom_request_demo_fallback_synthesizes_body() {
    let client = unreachable_client(FetchPolicy::DemoFallback);

    let resp = client
        .custom(HttpMethod::Get, "/devices", None, None)
        .await
        .unwrap();
    assert!(!resp.success);
    assert!(resp.data.get("devices").is_some());

    let resp = client
        .custom(HttpMethod::Get, "/unknown/endpoint", None, None)
        .await
        .unwrap();
    assert!(resp.data.get("message").is_some());
}

// ── Topology aggregate ──────────────────────────────────────────────

#[tokio::test]
async fn topology_aggregates_all_three_fetches() {
    let (server, client) = setup(FetchPolicy::Strict).await;

    Mock::given(method("GET"))
        .and(path("/onos/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(devices_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/onos/v1/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": [{
                "src": { "device": "of:1", "port": "2" },
                "dst": { "device": "of:2", "port": "2" },
                "type": "DIRECT",
                "state": "ACTIVE"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/onos/v1/hosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hosts": [{ "id": "00:00:00:00:00:01/None", "mac": "00:00:00:00:00:01" }]
        })))
        .mount(&server)
        .await;

    let topo = client.topology().await.unwrap();
    assert!(topo.success);

    // Aggregate equals the individual accessors run against the same
    // backing state.
    let devices = client.devices().await.unwrap();
    let links = client.links().await.unwrap();
    let hosts = client.hosts().await.unwrap();
    assert_eq!(topo.data.devices.len(), devices.data.len());
    assert_eq!(topo.data.devices[0].id, devices.data[0].id);
    assert_eq!(topo.data.links.len(), links.data.len());
    assert_eq!(topo.data.hosts.len(), hosts.data.len());
    assert_eq!(topo.data.hosts[0].mac, hosts.data[0].mac);
}

#[tokio::test]
async fn topology_success_is_and_of_subfetches() {
    let (server, client) = setup(FetchPolicy::DemoFallback).await;

    Mock::given(method("GET"))
        .and(path("/onos/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(devices_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/onos/v1/links"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/onos/v1/hosts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hosts": [] })))
        .mount(&server)
        .await;

    let topo = client.topology().await.unwrap();
    assert!(!topo.success, "one degraded sub-fetch fails the aggregate");
    assert!(topo.error.is_some());
    // Best-effort: live device data is still present.
    assert_eq!(topo.data.devices[0].id, "of:0000000000000001");
}
