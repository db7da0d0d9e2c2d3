//! # homedashd: homedash daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing` from the configured filter
//! - Construct the MQTT transport and its command publisher
//! - Construct the dashboard service, injecting publisher and event bus
//! - Start the transport with the service as its context
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT) and tear the transport down
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use homedash_adapter_http_axum::state::AppState;
use homedash_adapter_mqtt::MqttTransport;
use homedash_app::event_bus::InProcessEventBus;
use homedash_app::ports::Transport;
use homedash_app::services::dashboard_service::{DashboardService, DashboardSettings};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mapping = config.dashboard.build_mapping()?;
    tracing::info!(
        entries = mapping.len(),
        targets = mapping.targets().len(),
        policy = %config.dashboard.match_policy,
        "device mapping loaded"
    );

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(config.dashboard.event_capacity));

    // Transport
    let mut transport = MqttTransport::new(config.mqtt.clone());
    let publisher = transport.publisher();

    // Services
    let dashboard = Arc::new(DashboardService::new(
        DashboardSettings {
            mapping,
            policy: config.dashboard.match_policy,
            chat_capacity: config.dashboard.chat_capacity,
        },
        publisher,
        Arc::clone(&event_bus),
    ));
    dashboard.announce_ready().await;

    transport
        .start(Arc::clone(&dashboard))
        .await
        .context("starting MQTT transport")?;

    // HTTP
    let state =
        AppState::new(dashboard, event_bus).with_refresh_seconds(config.server.refresh_seconds);
    let app = homedash_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!(%bind_addr, "homedashd listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(err) = transport.teardown().await {
        tracing::warn!(error = %err, "transport teardown failed");
    }
    served.context("serving HTTP")?;

    tracing::info!("homedashd stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
