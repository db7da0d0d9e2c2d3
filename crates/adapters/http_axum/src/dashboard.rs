//! Server-side rendered status page (no JavaScript).
//!
//! The page carries `<meta http-equiv="refresh" content="N">` for
//! auto-reload. The command form uses POST + redirect (PRG pattern) to avoid
//! double-submission.

#[allow(clippy::missing_errors_doc)]
pub mod commands;
pub mod home;

use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};

use homedash_app::ports::CommandPublisher;
use homedash_domain::error::DomainError;

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<P>() -> Router<AppState<P>>
where
    P: CommandPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(home::index::<P>))
        .route("/commands", post(commands::submit::<P>))
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
    message: String,
}

/// Renders a [`DomainError`] as an HTML error page.
pub struct DashboardError(DomainError);

impl From<DomainError> for DashboardError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = crate::error::classify(&self.0);
        let page = ErrorTemplate {
            status: status.as_u16(),
            message,
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to render error page");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
