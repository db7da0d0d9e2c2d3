//! Command form handler.

use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use homedash_app::ports::CommandPublisher;

use super::DashboardError;
use crate::state::AppState;

/// Form data for the command box.
#[derive(Deserialize)]
pub struct CommandForm {
    pub text: String,
}

/// Possible responses from the form submission.
pub enum SubmitResponse {
    /// Redirect back to the status page.
    Redirect(Redirect),
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}

/// `POST /commands`: send a command, then redirect home (PRG).
pub async fn submit<P>(
    State(state): State<AppState<P>>,
    Form(form): Form<CommandForm>,
) -> Result<SubmitResponse, DashboardError>
where
    P: CommandPublisher + Send + Sync + 'static,
{
    state.dashboard.send_command(&form.text).await?;
    Ok(SubmitResponse::Redirect(Redirect::to("/")))
}
