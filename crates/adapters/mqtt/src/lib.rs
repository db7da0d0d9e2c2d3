//! # homedash-adapter-mqtt
//!
//! MQTT transport: bridges the controller's topic tree into homedash.
//!
//! ## Responsibilities
//! - Connect to the broker and subscribe to `<prefix>#`
//! - Route every publish under the prefix to the [`TransportContext`]
//! - Track the connection lifecycle in a [`ConnectionHandle`]
//! - Request a full status report shortly after each (re)connection
//! - Publish commands on `<prefix>voice_input` ([`MqttCommandPublisher`])
//!
//! ## Dependency rule
//! Same as other adapters: depends on `homedash-app` and `homedash-domain`.

mod config;
mod connection;
mod error;
mod publisher;
mod topics;

pub use config::MqttConfig;
pub use connection::ConnectionHandle;
pub use error::MqttError;
pub use publisher::MqttCommandPublisher;
pub use topics::Topics;

use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Outgoing, Packet, Publish, QoS};
use tokio::task::JoinHandle;

use homedash_app::ports::{Transport, TransportContext};
use homedash_domain::connection::ConnectionEvent;
use homedash_domain::error::DomainError;

/// MQTT transport driving a rumqttc event loop in a background task.
pub struct MqttTransport {
    config: MqttConfig,
    topics: Topics,
    client: AsyncClient,
    eventloop: Option<EventLoop>,
    connection: ConnectionHandle,
    task: Option<JoinHandle<()>>,
}

impl MqttTransport {
    /// Build the client and event loop. Nothing touches the network until
    /// [`start`](Transport::start).
    #[must_use]
    pub fn new(config: MqttConfig) -> Self {
        let client_id = config.effective_client_id();
        let mut options = MqttOptions::new(
            client_id.as_str(),
            config.broker_host.as_str(),
            config.broker_port,
        );
        options.set_keep_alive(config.keep_alive());
        options.set_clean_session(true);

        let (client, eventloop) = AsyncClient::new(options, config.channel_capacity.max(1));
        let topics = Topics::new(&config.topic_prefix);

        tracing::debug!(
            %client_id,
            host = %config.broker_host,
            port = config.broker_port,
            "MQTT client created"
        );

        Self {
            config,
            topics,
            client,
            eventloop: Some(eventloop),
            connection: ConnectionHandle::default(),
            task: None,
        }
    }

    /// Publisher for the command topic, sharing this transport's connection.
    #[must_use]
    pub fn publisher(&self) -> MqttCommandPublisher {
        MqttCommandPublisher::new(
            self.client.clone(),
            self.topics.command(),
            self.connection.clone(),
        )
    }

    /// The connection handle owned by this transport.
    #[must_use]
    pub fn connection(&self) -> ConnectionHandle {
        self.connection.clone()
    }

    #[must_use]
    pub fn topics(&self) -> &Topics {
        &self.topics
    }
}

impl Transport for MqttTransport {
    fn name(&self) -> &'static str {
        "mqtt"
    }

    async fn start(
        &mut self,
        ctx: impl TransportContext + Clone + 'static,
    ) -> Result<(), DomainError> {
        let eventloop = self.eventloop.take().ok_or(DomainError::Transport(
            "MQTT transport already started".into(),
        ))?;

        let worker = EventLoopWorker {
            eventloop,
            client: self.client.clone(),
            topics: self.topics.clone(),
            connection: self.connection.clone(),
            reconnect_delay: self.config.reconnect_delay(),
            status_request_delay: self.config.status_request_delay(),
            status_request: PendingStatusRequest::default(),
        };
        self.task = Some(tokio::spawn(worker.run(ctx)));

        tracing::info!(
            host = %self.config.broker_host,
            port = self.config.broker_port,
            topic = %self.topics.subscription(),
            "MQTT transport started"
        );
        Ok(())
    }

    async fn teardown(&mut self) -> Result<(), DomainError> {
        if let Err(err) = self.client.disconnect().await {
            tracing::debug!(error = %err, "MQTT disconnect request failed");
        }
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("MQTT event loop task aborted");
        }
        self.connection.apply(ConnectionEvent::Lost);
        tracing::info!("MQTT transport stopped");
        Ok(())
    }
}

/// Everything the background task owns.
struct EventLoopWorker {
    eventloop: EventLoop,
    client: AsyncClient,
    topics: Topics,
    connection: ConnectionHandle,
    reconnect_delay: Duration,
    status_request_delay: Duration,
    status_request: PendingStatusRequest,
}

impl EventLoopWorker {
    async fn run<C>(mut self, ctx: C)
    where
        C: TransportContext + Clone + 'static,
    {
        ctx.connection_changed(self.connection.apply(ConnectionEvent::Attempt))
            .await;

        loop {
            match self.eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                    tracing::info!(code = ?ack.code, "MQTT connected");
                    ctx.connection_changed(self.connection.apply(ConnectionEvent::Established))
                        .await;
                    subscribe(&self.client, &self.topics).await;
                    self.status_request
                        .schedule(self.status_request_delay, ctx.clone());
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    route_publish(&self.topics, &publish, &ctx).await;
                }
                Ok(Event::Incoming(Packet::Disconnect)) => {
                    tracing::warn!("MQTT broker closed the session");
                    self.status_request.cancel();
                    ctx.connection_changed(self.connection.apply(ConnectionEvent::Lost))
                        .await;
                }
                Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                    self.status_request.cancel();
                    ctx.connection_changed(self.connection.apply(ConnectionEvent::Lost))
                        .await;
                    break;
                }
                Ok(event) => {
                    tracing::trace!(?event, "MQTT event");
                }
                Err(err) => {
                    tracing::error!(error = %err, "MQTT connection error");
                    self.status_request.cancel();
                    ctx.connection_changed(
                        self.connection
                            .apply(ConnectionEvent::Failed(err.to_string())),
                    )
                    .await;
                    tokio::time::sleep(self.reconnect_delay).await;
                    ctx.connection_changed(self.connection.apply(ConnectionEvent::Attempt))
                        .await;
                }
            }
        }
    }
}

/// Subscribe to the whole tree under the prefix.
async fn subscribe(client: &AsyncClient, topics: &Topics) {
    let filter = topics.subscription();
    match client.subscribe(filter.as_str(), QoS::AtMostOnce).await {
        Ok(()) => tracing::debug!(%filter, "MQTT subscription requested"),
        Err(err) => tracing::error!(error = %err, %filter, "MQTT subscribe failed"),
    }
}

/// The delayed status request following a connection.
///
/// At most one is pending. It is aborted when replaced, cancelled, or dropped
/// along with the event loop task.
#[derive(Default)]
struct PendingStatusRequest {
    task: Option<JoinHandle<()>>,
}

impl PendingStatusRequest {
    fn schedule<C>(&mut self, delay: Duration, ctx: C)
    where
        C: TransportContext + 'static,
    {
        self.cancel();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = ctx.request_status().await {
                tracing::warn!(error = %err, "initial status request failed");
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PendingStatusRequest {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Hand a publish under the prefix to `ctx`; anything else is dropped.
async fn route_publish<C: TransportContext>(topics: &Topics, publish: &Publish, ctx: &C) {
    let Some(topic) = topics.relative(&publish.topic) else {
        tracing::debug!(topic = %publish.topic, "publish outside topic prefix");
        return;
    };
    let payload = String::from_utf8_lossy(&publish.payload);
    tracing::trace!(topic, %payload, "MQTT publish received");
    ctx.handle_message(topic, &payload).await;
}
