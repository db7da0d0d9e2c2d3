//! Shared fixtures for handler tests.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::response::Response;
use http_body_util::BodyExt;

use homedash_app::event_bus::InProcessEventBus;
use homedash_app::ports::CommandPublisher;
use homedash_app::services::dashboard_service::{DashboardService, DashboardSettings};
use homedash_domain::error::DomainError;
use homedash_domain::mapping::DeviceMapping;

use crate::state::AppState;

/// Publisher that records payloads, or refuses them when offline.
#[derive(Default)]
pub struct StubPublisher {
    pub offline: bool,
    pub sent: Mutex<Vec<String>>,
}

impl StubPublisher {
    pub fn offline() -> Self {
        Self {
            offline: true,
            sent: Mutex::default(),
        }
    }
}

impl CommandPublisher for StubPublisher {
    async fn publish_command(&self, payload: String) -> Result<(), DomainError> {
        if self.offline {
            return Err(DomainError::NotConnected);
        }
        self.sent.lock().unwrap().push(payload);
        Ok(())
    }
}

pub fn state_with(publisher: StubPublisher) -> AppState<StubPublisher> {
    let event_bus = Arc::new(InProcessEventBus::new(16));
    let settings = DashboardSettings {
        mapping: DeviceMapping::from_pairs([("lampu utama", "lamp"), ("pintu", "door")])
            .unwrap(),
        ..DashboardSettings::default()
    };
    let dashboard = Arc::new(DashboardService::new(
        settings,
        publisher,
        Arc::clone(&event_bus),
    ));
    AppState::new(dashboard, event_bus)
}

pub fn test_state() -> AppState<StubPublisher> {
    state_with(StubPublisher::default())
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
