//! MQTT transport configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the MQTT transport.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Append a random suffix to `client_id` (public brokers reject
    /// duplicate ids).
    pub randomize_client_id: bool,
    /// Topic prefix shared by the controller and the dashboard. Must end
    /// with `/`.
    pub topic_prefix: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Pause after a connection error before trying again, in seconds.
    pub reconnect_secs: u16,
    /// Delay between connecting and the initial status request, in
    /// milliseconds.
    pub status_request_delay_ms: u64,
    /// Capacity of the client request channel.
    pub channel_capacity: usize,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "broker.emqx.io".to_string(),
            broker_port: 1883,
            client_id: "homedash".to_string(),
            randomize_client_id: true,
            topic_prefix: "lutfi_140910/smart_home/".to_string(),
            keep_alive_secs: 30,
            reconnect_secs: 5,
            status_request_delay_ms: 1500,
            channel_capacity: 64,
        }
    }
}

impl MqttConfig {
    /// Client id sent to the broker.
    #[must_use]
    pub fn effective_client_id(&self) -> String {
        if self.randomize_client_id {
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            format!("{}_{}", self.client_id, &suffix[..8])
        } else {
            self.client_id.clone()
        }
    }

    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(u64::from(self.keep_alive_secs))
    }

    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.reconnect_secs))
    }

    #[must_use]
    pub fn status_request_delay(&self) -> Duration {
        Duration::from_millis(self.status_request_delay_ms)
    }
}
