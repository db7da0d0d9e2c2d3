//! Transport port: lifecycle and callbacks for the broker connection.
//!
//! A transport bridges an external protocol (MQTT today) into the dashboard.
//! It owns the connection handle, reports every lifecycle change and every
//! inbound message through a [`TransportContext`], and exposes a
//! [`CommandPublisher`](super::CommandPublisher) for the other direction.

use std::future::Future;

use homedash_domain::connection::ConnectionState;
use homedash_domain::error::DomainError;

/// Callbacks a transport drives while it runs.
///
/// The application provides the implementation (backed by
/// `DashboardService`); transports only see this trait.
pub trait TransportContext: Send + Sync {
    /// An inbound message arrived on `topic` (relative to the topic prefix).
    fn handle_message(&self, topic: &str, payload: &str) -> impl Future<Output = ()> + Send;

    /// The connection handle moved to `state`.
    fn connection_changed(&self, state: ConnectionState) -> impl Future<Output = ()> + Send;

    /// Ask the controller to report every device (sent after connecting).
    fn request_status(&self) -> impl Future<Output = Result<(), DomainError>> + Send;
}

/// A pluggable transport.
///
/// The binary crate calls the lifecycle methods in order:
///
/// 1. [`start`](Self::start): connect and spawn the background event loop
/// 2. (the server runs; commands flow through the transport's publisher)
/// 3. [`teardown`](Self::teardown): disconnect and stop background tasks
pub trait Transport {
    /// Unique name identifying this transport (e.g. `"mqtt"`).
    fn name(&self) -> &'static str;

    /// Spawn the background task that keeps the connection alive and feeds
    /// `ctx`. Returns immediately.
    fn start(
        &mut self,
        ctx: impl TransportContext + Clone + 'static,
    ) -> impl Future<Output = Result<(), DomainError>> + Send;

    /// Called on graceful shutdown.
    fn teardown(&mut self) -> impl Future<Output = Result<(), DomainError>> + Send;
}

impl<T: TransportContext> TransportContext for std::sync::Arc<T> {
    fn handle_message(&self, topic: &str, payload: &str) -> impl Future<Output = ()> + Send {
        (**self).handle_message(topic, payload)
    }

    fn connection_changed(&self, state: ConnectionState) -> impl Future<Output = ()> + Send {
        (**self).connection_changed(state)
    }

    fn request_status(&self) -> impl Future<Output = Result<(), DomainError>> + Send {
        (**self).request_status()
    }
}
