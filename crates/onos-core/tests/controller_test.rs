#![allow(clippy::unwrap_used)]

//! Controller facade integration tests against a local mock controller.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use onos_core::{
    ConnectionSettings, Controller, CoreError, Credentials, FetchPolicy, SettingsBus,
    TransportConfig,
};

fn settings_for(server: &MockServer) -> ConnectionSettings {
    let addr = server.address();
    ConnectionSettings::new(addr.ip().to_string(), addr.port().to_string())
}

fn controller_on(bus: &SettingsBus) -> Controller {
    Controller::new(
        bus,
        Credentials::default(),
        TransportConfig::default(),
        FetchPolicy::Strict,
    )
    .unwrap()
}

async fn mount_devices(server: &MockServer, device_id: &str) {
    Mock::given(method("GET"))
        .and(path("/onos/v1/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "devices": [{ "id": device_id, "available": true }]
        })))
        .mount(server)
        .await;
}

async fn mount_empty(server: &MockServer, endpoint: &str, key: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/onos/v1/{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ key: [] })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn settings_change_applies_on_next_call() {
    let old = MockServer::start().await;
    let new = MockServer::start().await;
    mount_devices(&old, "of:old").await;
    mount_devices(&new, "of:new").await;

    let bus = SettingsBus::new(settings_for(&old));
    let controller = controller_on(&bus);

    let before = controller.devices().await.unwrap();
    assert_eq!(before.data[0].id, "of:old");

    bus.save(settings_for(&new));

    // The very next call must hit the new target.
    let after = controller.devices().await.unwrap();
    assert_eq!(after.data[0].id, "of:new");
}

#[tokio::test]
async fn non_json_request_body_is_sent_as_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/onos/v1/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let bus = SettingsBus::new(settings_for(&server));
    let controller = controller_on(&bus);

    let mut request = onos_core::ApiRequest::draft(
        "activate",
        onos_core::HttpMethod::Post,
        "/applications",
    );
    request.body = Some("plainly not json".to_owned());

    let response = controller.send_request(&request).await.unwrap();
    assert!(response.success);

    let received = &server.received_requests().await.unwrap()[0];
    assert_eq!(
        String::from_utf8_lossy(&received.body),
        "\"plainly not json\""
    );
}

#[tokio::test]
async fn refresh_once_populates_the_store() {
    let server = MockServer::start().await;
    mount_devices(&server, "of:1").await;
    mount_empty(&server, "links", "links").await;
    mount_empty(&server, "hosts", "hosts").await;

    let bus = SettingsBus::new(settings_for(&server));
    let controller = controller_on(&bus);

    assert!(controller.refresh_once().await.unwrap());
    assert_eq!(controller.store().devices_snapshot()[0].id, "of:1");
    assert!(controller.store().last_refresh().is_some());
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_snapshot() {
    // An unpooled server: `MockServer::start()` hands out a pooled server
    // whose listener stays open after drop, so `drop(server)` would not
    // actually take the controller offline.
    let server = MockServer::builder().start().await;
    mount_devices(&server, "of:1").await;
    mount_empty(&server, "links", "links").await;
    mount_empty(&server, "hosts", "hosts").await;

    let bus = SettingsBus::new(settings_for(&server));
    let controller = controller_on(&bus);
    assert!(controller.refresh_once().await.unwrap());

    // Take the controller offline; the next poll must fail without
    // disturbing what is already in the store.
    drop(server);

    let err = controller.refresh_once().await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::ConnectionFailed { .. } | CoreError::Timeout | CoreError::Api { .. }
    ));
    assert_eq!(controller.store().devices_snapshot()[0].id, "of:1");
}

#[tokio::test]
async fn poller_stops_on_shutdown() {
    let server = MockServer::start().await;
    mount_devices(&server, "of:1").await;
    mount_empty(&server, "links", "links").await;
    mount_empty(&server, "hosts", "hosts").await;

    let bus = SettingsBus::new(settings_for(&server));
    let controller = controller_on(&bus);

    let handle = controller.spawn_poller(std::time::Duration::from_millis(10));
    let mut refreshed = controller.store().subscribe_last_refresh();
    refreshed.changed().await.unwrap();
    assert!(controller.store().last_refresh().is_some());

    controller.shutdown();
    handle.await.unwrap();
}
