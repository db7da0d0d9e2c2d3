//! Command port: relays user commands to the remote controller.

use std::future::Future;

use homedash_domain::error::DomainError;

/// Sends a command payload to the controller.
///
/// Implementations return [`DomainError::NotConnected`] when the transport
/// has no live session.
pub trait CommandPublisher {
    /// Publish `payload` on the command channel.
    fn publish_command(&self, payload: String)
    -> impl Future<Output = Result<(), DomainError>> + Send;
}

impl<T: CommandPublisher + Send + Sync> CommandPublisher for std::sync::Arc<T> {
    fn publish_command(
        &self,
        payload: String,
    ) -> impl Future<Output = Result<(), DomainError>> + Send {
        (**self).publish_command(payload)
    }
}
