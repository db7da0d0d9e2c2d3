//! Command publisher backed by the rumqttc client.

use std::future::Future;

use rumqttc::{AsyncClient, QoS};

use homedash_app::ports::CommandPublisher;
use homedash_domain::error::DomainError;

use crate::connection::ConnectionHandle;
use crate::error::MqttError;

/// Publishes commands on `<prefix>voice_input`.
#[derive(Clone)]
pub struct MqttCommandPublisher {
    client: AsyncClient,
    topic: String,
    connection: ConnectionHandle,
}

impl MqttCommandPublisher {
    pub(crate) fn new(client: AsyncClient, topic: String, connection: ConnectionHandle) -> Self {
        Self {
            client,
            topic,
            connection,
        }
    }

    /// Topic commands go to.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    async fn publish(&self, payload: String) -> Result<(), MqttError> {
        if !self.connection.is_connected() {
            return Err(MqttError::NotConnected);
        }
        self.client
            .publish(self.topic.as_str(), QoS::AtMostOnce, false, payload)
            .await?;
        Ok(())
    }
}

impl CommandPublisher for MqttCommandPublisher {
    fn publish_command(
        &self,
        payload: String,
    ) -> impl Future<Output = Result<(), DomainError>> + Send {
        async move {
            tracing::debug!(topic = %self.topic, %payload, "publishing command");
            self.publish(payload).await.map_err(MqttError::into_domain)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::connection::ConnectionEvent;
    use rumqttc::MqttOptions;

    fn publisher() -> (MqttCommandPublisher, rumqttc::EventLoop, ConnectionHandle) {
        let (client, eventloop) = AsyncClient::new(MqttOptions::new("test", "localhost", 1883), 8);
        let handle = ConnectionHandle::default();
        let publisher =
            MqttCommandPublisher::new(client, "home/voice_input".to_string(), handle.clone());
        (publisher, eventloop, handle)
    }

    #[tokio::test]
    async fn should_refuse_to_publish_while_disconnected() {
        let (publisher, _eventloop, _) = publisher();
        let err = publisher
            .publish_command("status".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotConnected));
    }

    #[tokio::test]
    async fn should_queue_publish_while_connected() {
        let (publisher, _eventloop, handle) = publisher();
        handle.apply(ConnectionEvent::Attempt);
        handle.apply(ConnectionEvent::Established);

        let result = publisher.publish_command("status".to_string()).await;

        assert!(result.is_ok());
        assert_eq!(publisher.topic(), "home/voice_input");
    }
}
