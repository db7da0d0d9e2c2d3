//! Event bus port: publish/subscribe for dashboard events.

use std::future::Future;

use homedash_domain::error::DomainError;
use homedash_domain::event::DashboardEvent;

/// Publishes dashboard events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(
        &self,
        event: DashboardEvent,
    ) -> impl Future<Output = Result<(), DomainError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: DashboardEvent,
    ) -> impl Future<Output = Result<(), DomainError>> + Send {
        (**self).publish(event)
    }
}
