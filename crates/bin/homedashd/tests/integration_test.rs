//! End-to-end smoke tests for the full homedashd stack.
//!
//! Each test wires the real MQTT publisher (never started, so it stays
//! disconnected), the real dashboard service and the real axum router, then
//! exercises the HTTP layer via `tower::ServiceExt::oneshot`; no TCP port is
//! bound and no broker is contacted. Inbound traffic is injected through the
//! service's transport context, exactly as the MQTT event loop would.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use homedash_adapter_http_axum::router;
use homedash_adapter_http_axum::state::AppState;
use homedash_adapter_mqtt::{MqttCommandPublisher, MqttConfig, MqttTransport};
use homedash_app::event_bus::InProcessEventBus;
use homedash_app::ports::TransportContext;
use homedash_app::services::dashboard_service::{DashboardService, DashboardSettings};
use homedash_domain::connection::ConnectionState;
use tower::ServiceExt;

type Dashboard = DashboardService<MqttCommandPublisher, Arc<InProcessEventBus>>;

fn stack() -> (axum::Router, Arc<Dashboard>) {
    let transport = MqttTransport::new(MqttConfig {
        broker_host: "localhost".to_string(),
        randomize_client_id: false,
        ..MqttConfig::default()
    });
    let event_bus = Arc::new(InProcessEventBus::new(64));
    let dashboard = Arc::new(DashboardService::new(
        DashboardSettings::default(),
        transport.publisher(),
        Arc::clone(&event_bus),
    ));
    let app = router::build(AppState::new(Arc::clone(&dashboard), event_bus));
    (app, dashboard)
}

async fn get_json(app: axum::Router, uri: &str) -> serde_json::Value {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn tile<'a>(targets: &'a serde_json::Value, id: &str) -> &'a serde_json::Value {
    targets
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["target_id"] == id)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Health check & pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let (app, _) = stack();

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn should_render_home_page_with_default_targets() {
    let (app, dashboard) = stack();
    dashboard.announce_ready().await;

    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(
        resp.into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec(),
    )
    .unwrap();
    assert!(body.contains("Dashboard"));
    assert!(body.contains("status-ac"));
    assert!(body.contains("System ready."));
}

// ---------------------------------------------------------------------------
// Reconciliation through the transport context
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_update_every_alias_of_the_main_lamp() {
    let (app, dashboard) = stack();

    dashboard.handle_message("status", "Lampu Utama: ON").await;

    let targets = get_json(app, "/api/targets").await;
    for id in ["lamp1", "lamp"] {
        let lamp = tile(&targets, id);
        assert_eq!(lamp["display_text"], "On");
        assert_eq!(lamp["is_active"], true);
        assert_eq!(lamp["color"], "#4CAF50");
    }
    assert_eq!(tile(&targets, "lamp2")["display_text"], "Unknown");
}

#[tokio::test]
async fn should_render_door_and_curtain_conventions() {
    let (app, dashboard) = stack();

    dashboard
        .handle_message("status", "Solenoid Door: Terkunci")
        .await;
    dashboard
        .handle_message("status", "Tirai Buka: Setengah Terbuka")
        .await;

    let targets = get_json(app, "/api/targets").await;
    let door = tile(&targets, "door");
    assert_eq!(door["display_text"], "Locked");
    assert_eq!(door["is_active"], false);
    let curtain = tile(&targets, "curtain");
    assert_eq!(curtain["display_text"], "Setengah Terbuka");
    assert_eq!(curtain["is_active"], true);
}

#[tokio::test]
async fn should_ignore_unmatched_and_malformed_notifications() {
    let (app, dashboard) = stack();
    let before = get_json(app.clone(), "/api/targets").await;

    dashboard.handle_message("status", "Garasi: ON").await;
    dashboard.handle_message("status", "no separator here").await;

    let after = get_json(app.clone(), "/api/targets").await;
    assert_eq!(before, after);
    assert_eq!(get_json(app, "/api/chat").await, serde_json::json!([]));
}

#[tokio::test]
async fn should_record_sensor_and_reply_lines_in_transcript() {
    let (app, dashboard) = stack();

    dashboard
        .handle_message("sensor", "SENSOR: Suhu 29C, Lembab 70%")
        .await;
    dashboard
        .handle_message("voice_reply", "Lampu kamar sudah dinyalakan")
        .await;

    let chat = get_json(app, "/api/chat").await;
    let lines = chat.as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["sender"], "sensor");
    assert_eq!(lines[0]["text"], "Suhu 29C, Lembab 70%");
    assert_eq!(lines[1]["sender"], "bot");
}

// ---------------------------------------------------------------------------
// Connection lifecycle & commands
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_mirror_connection_onto_placeholders() {
    let (app, dashboard) = stack();

    dashboard.handle_message("status", "Kipas: Nyala").await;
    dashboard
        .connection_changed(ConnectionState::Connected)
        .await;

    let connection = get_json(app.clone(), "/api/connection").await;
    assert_eq!(connection["state"], "connected");
    assert_eq!(connection["connected"], true);

    let targets = get_json(app, "/api/targets").await;
    assert_eq!(tile(&targets, "fan")["display_text"], "On");
    assert_eq!(tile(&targets, "pump")["display_text"], "Off");
    assert_eq!(tile(&targets, "pump")["color"], "#f44336");
}

#[tokio::test]
async fn should_refuse_commands_while_broker_is_unreachable() {
    let (app, dashboard) = stack();

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/commands")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text": "status"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(dashboard.chat(10).is_empty());
}
