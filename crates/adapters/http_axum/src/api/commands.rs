//! JSON handler for relaying user commands.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use homedash_app::ports::CommandPublisher;
use homedash_domain::chat::ChatMessage;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for sending a command.
#[derive(Deserialize)]
pub struct SendCommandRequest {
    pub text: String,
}

/// Possible responses from the send endpoint.
pub enum SendResponse {
    /// The command left for the controller; the body is the transcript line.
    Accepted(Json<ChatMessage>),
}

impl IntoResponse for SendResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
        }
    }
}

/// `POST /api/commands`: publish a command to the controller.
pub async fn send<P>(
    State(state): State<AppState<P>>,
    Json(req): Json<SendCommandRequest>,
) -> Result<SendResponse, ApiError>
where
    P: CommandPublisher + Send + Sync + 'static,
{
    let message = state.dashboard.send_command(&req.text).await?;
    Ok(SendResponse::Accepted(Json(message)))
}
