#![allow(clippy::unwrap_used, clippy::float_cmp)]
// Integration tests for `Controller` against a wiremock router.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use keenetic_core::{Controller, CoreError, InterfaceKind, LinkState, RouterConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Controller) {
    setup_with(|_| {}).await
}

async fn setup_with(tweak: impl FnOnce(&mut RouterConfig)) -> (MockServer, Controller) {
    let server = MockServer::start().await;
    let addr = server.address();
    let mut config = RouterConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        username: "admin".into(),
        password: SecretString::from("secret".to_owned()),
        timeout: Duration::from_secs(5),
        ..RouterConfig::default()
    };
    tweak(&mut config);
    let controller = Controller::new(config).unwrap();
    (server, controller)
}

async fn mount_get(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_auth(server: &MockServer) {
    mount_get(server, "/rci/", 200, json!({})).await;
}

async fn mount_system(server: &MockServer) {
    mount_get(
        server,
        "/rci/show/system",
        200,
        json!({
            "hostname": "Keenetic-1234",
            "domainname": "WORKGROUP",
            "cpuload": 9,
            "memtotal": 1000,
            "memfree": 250,
            "memory": "512/1024",
            "uptime": "7200"
        }),
    )
    .await;
    mount_get(
        server,
        "/rci/show/version",
        200,
        json!({
            "title": "4.1.7",
            "sandbox": "stable",
            "model": "Giga",
            "device": "Keenetic Giga",
            "hw_version": "10218000"
        }),
    )
    .await;
}

async fn mount_interface_tree(server: &MockServer) {
    mount_get(
        server,
        "/rci/show/interface",
        200,
        json!({
            "GigabitEthernet0": {
                "id": "GigabitEthernet0",
                "type": "GigabitEthernet",
                "port": {
                    "0": { "id": "GigabitEthernet0/0", "label": "0", "link": "up",
                           "speed": 1000, "role": ["inet"] },
                    "1": { "id": "GigabitEthernet0/1", "label": "1", "link": "down" }
                }
            },
            "Bridge0": { "id": "Bridge0", "type": "Bridge", "link": "up" }
        }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/rci/show/interface/stat"))
        .and(query_param("name", "GigabitEthernet0/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rxbytes": 1_000_000,
            "txbytes": "2000000",
            "rxspeed": 800,
            "txspeed": 400
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rci/show/interface/stat"))
        .and(query_param("name", "GigabitEthernet0/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

async fn mount_wifi(server: &MockServer) {
    for master in ["WifiMaster0", "WifiMaster1"] {
        mount_get(server, &format!("/rci/interface/{master}"), 200, json!({ "up": true })).await;
        mount_get(
            server,
            &format!("/rci/interface/{master}/AccessPoint0"),
            200,
            json!({
                "ssid": "Home",
                "up": true,
                "encryption": { "enable": true, "wpa2": true },
                "authentication": { "wpa-psk": { "psk": "correct horse" } }
            }),
        )
        .await;
    }

    Mock::given(method("GET"))
        .and(path_regex(r"^/rci/interface/WifiMaster[01]/AccessPoint[1-6]$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ssid": "" })))
        .mount(server)
        .await;
}

async fn mount_modems(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/rci/"))
        .and(body_json(json!({ "show": { "interface": { "name": "UsbLte0" } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "show": { "interface": {
                "id": "UsbLte0",
                "connected": "yes",
                "connection-state": "Connected",
                "operator": "Turkcell",
                "mobile": "4G",
                "rssi": -67
            }}
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rci/"))
        .and(body_json(json!({ "show": { "interface": { "name": "UsbModem0" } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "show": { "interface": { "status": [
                { "status": "error", "message": "unable to find UsbModem0" }
            ]}}
        })))
        .mount(server)
        .await;
}

async fn mount_mesh(server: &MockServer) {
    mount_get(
        server,
        "/rci/show/mws/member",
        200,
        json!([
            { "hostname": "orphan" },
            { "mac": "AA:BB:CC:DD:EE:FF", "known-host": "Hallway", "fw": "4.1.7",
              "internet-available": true }
        ]),
    )
    .await;
}

async fn mount_router(server: &MockServer) {
    mount_auth(server).await;
    mount_system(server).await;
    mount_interface_tree(server).await;
    mount_wifi(server).await;
    mount_modems(server).await;
}

// ── Poll cycle tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_full_cycle() {
    let (server, controller) = setup().await;
    mount_router(&server).await;
    mount_mesh(&server).await;

    let snapshot = controller.try_snapshot().await.unwrap();

    let system = snapshot.system.as_ref().unwrap();
    assert_eq!(system.memory_usage_pct, 75.0);
    assert_eq!(system.ram_usage_pct, 50.0);
    assert_eq!(system.uptime_secs, 7200);

    let version = snapshot.version.as_ref().unwrap();
    assert_eq!(version.firmware_version, "4.1.7");
    assert_eq!(version.manufacturer, "Keenetic");

    assert_eq!(
        snapshot.interfaces.keys().map(String::as_str).collect::<Vec<_>>(),
        [
            "GigabitEthernet0/0",
            "GigabitEthernet0/1",
            "WifiMaster0/AccessPoint0",
            "WifiMaster1/AccessPoint0",
            "UsbLte0",
        ]
    );

    let wan = snapshot.interface("GigabitEthernet0/0").unwrap();
    assert_eq!(wan.kind, InterfaceKind::Wan);
    let counters = wan.ethernet().unwrap();
    assert_eq!(counters.rx_bytes, Some(1_000_000));
    assert_eq!(counters.tx_bytes, Some(2_000_000));

    // stats call failed for this port; the record survives without counters
    let lan = snapshot.interface("GigabitEthernet0/1").unwrap();
    assert_eq!(lan.kind, InterfaceKind::Port);
    assert_eq!(lan.ethernet().unwrap().rx_bytes, None);

    let lte = snapshot.interface("UsbLte0").unwrap();
    assert_eq!(lte.kind, InterfaceKind::Mobile);
    assert!(lte.up);
    assert_eq!(lte.link, LinkState::Up);

    assert_eq!(snapshot.mesh.len(), 1);
    assert_eq!(
        snapshot.mesh_node("aa-bb-cc-dd-ee-ff").unwrap().display_name(),
        "Hallway"
    );
}

#[tokio::test]
async fn test_wifi_scan_keeps_only_named_access_points() {
    let (server, controller) = setup().await;
    mount_router(&server).await;
    mount_mesh(&server).await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/rci/interface/WifiMaster[01]/AccessPoint7$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ssid": "Hidden" })))
        .expect(0)
        .mount(&server)
        .await;

    let snapshot = controller.snapshot().await;
    let aps: Vec<&str> = snapshot
        .interfaces_of_kind(InterfaceKind::AccessPoint)
        .map(|r| r.id.as_str())
        .collect();

    assert_eq!(aps, ["WifiMaster0/AccessPoint0", "WifiMaster1/AccessPoint0"]);
    let ssid = snapshot
        .interface("WifiMaster1/AccessPoint0")
        .and_then(|r| r.wifi())
        .map(|w| w.ssid.clone());
    assert_eq!(ssid.as_deref(), Some("Home"));
}

#[tokio::test]
async fn test_unreadable_radio_skips_band() {
    let (server, controller) = setup().await;
    mount_auth(&server).await;
    mount_system(&server).await;

    mount_get(&server, "/rci/interface/WifiMaster0", 404, json!({})).await;
    mount_get(&server, "/rci/interface/WifiMaster1", 200, json!({})).await;
    mount_get(
        &server,
        "/rci/interface/WifiMaster1/AccessPoint0",
        200,
        json!({ "ssid": "Fast", "up": false }),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/rci/interface/WifiMaster0/AccessPoint0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ssid": "Never" })))
        .expect(0)
        .mount(&server)
        .await;

    let snapshot = controller.snapshot().await;
    let aps: Vec<&str> = snapshot
        .interfaces_of_kind(InterfaceKind::AccessPoint)
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(aps, ["WifiMaster1/AccessPoint0"]);
}

#[tokio::test]
async fn test_mesh_failure_keeps_the_rest() {
    let (server, controller) = setup().await;
    mount_router(&server).await;
    mount_get(&server, "/rci/show/mws/member", 500, json!({})).await;

    let snapshot = controller.try_snapshot().await.unwrap();

    assert!(snapshot.system.is_some());
    assert!(snapshot.version.is_some());
    assert!(!snapshot.interfaces.is_empty());
    assert!(snapshot.mesh.is_empty());
}

#[tokio::test]
async fn test_mesh_disabled_skips_fetch() {
    let (server, controller) = setup_with(|c| c.enable_mesh = false).await;
    mount_router(&server).await;

    Mock::given(method("GET"))
        .and(path("/rci/show/mws/member"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let snapshot = controller.try_snapshot().await.unwrap();
    assert!(snapshot.mesh.is_empty());
}

#[tokio::test]
async fn test_total_failure_degrades_to_empty_snapshot() {
    let (server, controller) = setup().await;
    mount_auth(&server).await;

    // Every data endpoint answers 500 (wiremock's default is 404 for
    // unmatched requests, which fails the same way).
    Mock::given(method("GET"))
        .and(path_regex(r"^/rci/.+"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = controller.try_snapshot().await;
    assert!(
        matches!(result, Err(CoreError::EmptySnapshot)),
        "expected EmptySnapshot, got: {result:?}"
    );
    assert!(controller.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_bad_credentials() {
    let (server, controller) = setup().await;
    mount_get(&server, "/rci/", 401, json!({})).await;

    let result = controller.connect().await;
    assert!(
        matches!(result, Err(CoreError::AuthenticationFailed { .. })),
        "expected AuthenticationFailed, got: {result:?}"
    );

    let result = controller.try_snapshot().await;
    assert!(matches!(result, Err(CoreError::AuthenticationFailed { .. })));
    assert!(controller.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_validate_returns_identity() {
    let (server, controller) = setup().await;
    mount_router(&server).await;
    mount_mesh(&server).await;

    let identity = controller.validate().await.unwrap();
    assert_eq!(identity.device, "Keenetic Giga");
    assert_eq!(identity.model, "Giga");
    assert_eq!(identity.manufacturer, "Keenetic");
    assert_eq!(identity.firmware_version, "4.1.7");
    assert_eq!(identity.cpu_load, 9.0);
}

// ── Control action tests ────────────────────────────────────────────

#[tokio::test]
async fn test_radio_control_reports_status() {
    let (server, controller) = setup().await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(path("/rci/interface/WifiMaster0/AccessPoint0"))
        .and(body_json(json!({ "up": "true" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rci/interface/WifiMaster0/AccessPoint0"))
        .and(body_json(json!({ "down": "true" })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(controller.enable("WifiMaster0/AccessPoint0").await);
    assert!(!controller.disable("WifiMaster0/AccessPoint0").await);
}

#[tokio::test]
async fn test_radio_control_unreachable_is_false() {
    let (server, controller) = setup().await;
    drop(server);

    assert!(!controller.set_radio_enabled("WifiMaster0/AccessPoint0", true).await);
}

#[tokio::test]
async fn test_sms_rejects_empty_input_locally() {
    let (server, controller) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = controller.send_sms("", "hello").await;
    assert!(matches!(result, Err(CoreError::InvalidInput { ref field, .. }) if field == "recipient"));

    let result = controller.send_sms("+900000000", "  ").await;
    assert!(matches!(result, Err(CoreError::InvalidInput { ref field, .. }) if field == "message"));
}

#[tokio::test]
async fn test_sms_goes_through_mobile_interface() {
    let (server, controller) = setup_with(|c| c.mobile_interface = "UsbLte1".into()).await;
    mount_auth(&server).await;

    Mock::given(method("POST"))
        .and(path("/rci/"))
        .and(body_json(json!([{
            "sms": { "send": { "interface": "UsbLte1", "to": "+900000000", "message": "hello" } }
        }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{}])))
        .expect(1)
        .mount(&server)
        .await;

    controller.send_sms("+900000000", "hello").await.unwrap();
}
