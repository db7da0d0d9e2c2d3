//! JSON handler for the chat transcript.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use homedash_app::ports::CommandPublisher;
use homedash_domain::chat::ChatMessage;

use crate::state::AppState;

/// Query parameters for the transcript endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ChatQuery {
    /// Return only the newest `limit` lines.
    pub limit: Option<usize>,
}

/// `GET /api/chat`: transcript lines, oldest first.
pub async fn list<P>(
    State(state): State<AppState<P>>,
    Query(query): Query<ChatQuery>,
) -> Json<Vec<ChatMessage>>
where
    P: CommandPublisher + Send + Sync + 'static,
{
    Json(state.dashboard.chat(query.limit.unwrap_or(usize::MAX)))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::router::build;
    use crate::state::AppState;
    use crate::test_support::{StubPublisher, body_string, test_state};

    async fn fetch(uri: &str, state: AppState<StubPublisher>) -> serde_json::Value {
        let response = build(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    #[tokio::test]
    async fn should_return_empty_transcript_initially() {
        let body = fetch("/api/chat", test_state()).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn should_return_transcript_lines_oldest_first() {
        let state = test_state();
        state.dashboard.announce_ready().await;
        state
            .dashboard
            .handle_inbound("voice_reply", "Lamp is on")
            .await;

        let body = fetch("/api/chat", state).await;
        let lines = body.as_array().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["sender"], "system");
        assert_eq!(lines[1]["sender"], "bot");
        assert_eq!(lines[1]["text"], "Lamp is on");
    }

    #[tokio::test]
    async fn should_limit_transcript_to_newest_lines() {
        let state = test_state();
        state.dashboard.handle_inbound("sensor", "SENSOR: 21C").await;
        state.dashboard.handle_inbound("sensor", "SENSOR: 22C").await;

        let body = fetch("/api/chat?limit=1", state).await;
        let lines = body.as_array().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["sender"], "sensor");
    }
}
