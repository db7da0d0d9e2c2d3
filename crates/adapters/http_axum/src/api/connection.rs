//! JSON handler for the transport connection state.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use homedash_app::ports::CommandPublisher;
use homedash_domain::connection::ConnectionState;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ConnectionResponse {
    #[serde(flatten)]
    pub state: ConnectionState,
    pub connected: bool,
}

/// `GET /api/connection`
pub async fn get<P>(State(state): State<AppState<P>>) -> Json<ConnectionResponse>
where
    P: CommandPublisher + Send + Sync + 'static,
{
    let connection = state.dashboard.connection();
    Json(ConnectionResponse {
        connected: connection.is_connected(),
        state: connection,
    })
}
