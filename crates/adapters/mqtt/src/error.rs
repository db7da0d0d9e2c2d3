//! MQTT adapter error types.

use homedash_domain::error::DomainError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The broker session is not up.
    #[error("MQTT client not connected")]
    NotConnected,

    /// The rumqttc client returned an error.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),
}

impl MqttError {
    /// Convert into a [`DomainError`] for propagation across port
    /// boundaries.
    #[must_use]
    pub fn into_domain(self) -> DomainError {
        match self {
            Self::NotConnected => DomainError::NotConnected,
            other => DomainError::Transport(Box::new(other)),
        }
    }
}

impl From<MqttError> for DomainError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}

impl From<rumqttc::ClientError> for MqttError {
    fn from(err: rumqttc::ClientError) -> Self {
        Self::Client(err)
    }
}
