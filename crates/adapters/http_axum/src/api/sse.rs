//! Server-Sent Events (SSE) stream for real-time updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use homedash_app::ports::CommandPublisher;
use homedash_domain::event::DashboardEvent;

use crate::state::AppState;

/// `GET /api/events/stream`: SSE stream of dashboard events.
///
/// Subscribes to the event bus broadcast channel and sends JSON-encoded
/// events as SSE `data:` frames, with the event kind as the SSE `event:`
/// name. The stream continues until the client disconnects or the event
/// bus is closed.
pub async fn stream<P>(
    State(state): State<AppState<P>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    P: CommandPublisher + Send + Sync + 'static,
{
    let event_rx = state.event_bus.subscribe();
    tracing::debug!(
        subscribers = state.event_bus.subscriber_count(),
        "SSE client subscribed"
    );
    let event_stream = BroadcastStream::new(event_rx).filter_map(|result| match result {
        Ok(event) => to_sse(&event).map(Ok),
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(
                skipped = n,
                "SSE subscriber lagged, some events were dropped"
            );
            None
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

fn to_sse(event: &DashboardEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Event::default().event(event_name(event)).data(json)),
        Err(err) => {
            tracing::warn!(%err, "failed to serialize event to JSON for SSE stream");
            None
        }
    }
}

fn event_name(event: &DashboardEvent) -> &'static str {
    match event {
        DashboardEvent::TargetChanged { .. } => "target_changed",
        DashboardEvent::ChatAppended { .. } => "chat_appended",
        DashboardEvent::Speak { .. } => "speak",
        DashboardEvent::ConnectionChanged { .. } => "connection_changed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;

    #[tokio::test]
    async fn should_subscribe_to_event_bus_when_stream_created() {
        let state = test_state();
        let event_bus = std::sync::Arc::clone(&state.event_bus);
        let before = event_bus.subscriber_count();

        let _sse_response = stream(State(state)).await;

        assert_eq!(event_bus.subscriber_count(), before + 1);
    }

    #[tokio::test]
    async fn should_broadcast_reconciled_tiles_to_subscribers() {
        let state = test_state();
        let mut rx = state.event_bus.subscribe();

        state
            .dashboard
            .handle_inbound("status", "Pintu: Terbuka")
            .await;

        let received = rx.recv().await.unwrap();
        assert_eq!(event_name(&received), "target_changed");
        let DashboardEvent::TargetChanged { target } = received else {
            panic!("expected a target change");
        };
        assert_eq!(target.target_id, "door");
    }

    #[test]
    fn should_name_events_after_their_kind() {
        let event = DashboardEvent::Speak {
            text: "hello".to_string(),
        };
        assert_eq!(event_name(&event), "speak");
        assert!(to_sse(&event).is_some());
    }
}
