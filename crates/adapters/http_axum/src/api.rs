//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod chat;
#[allow(clippy::missing_errors_doc)]
pub mod commands;
pub mod connection;
pub mod sse;
pub mod targets;

use axum::Router;
use axum::routing::{get, post};

use homedash_app::ports::CommandPublisher;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<P>() -> Router<AppState<P>>
where
    P: CommandPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/targets", get(targets::list::<P>))
        .route("/targets/{id}", get(targets::get::<P>))
        .route("/chat", get(chat::list::<P>))
        .route("/connection", get(connection::get::<P>))
        .route("/commands", post(commands::send::<P>))
        .route("/events/stream", get(sse::stream::<P>))
}
