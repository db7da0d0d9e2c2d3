//! JSON handlers for dashboard tiles.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homedash_app::ports::CommandPublisher;
use homedash_domain::board::TargetView;
use homedash_domain::mapping::TargetKind;
use homedash_domain::time::Timestamp;

use crate::state::AppState;

/// Wire shape of one tile.
#[derive(Debug, Serialize)]
pub struct TargetResponse {
    pub target_id: String,
    pub kind: TargetKind,
    pub display_text: String,
    pub is_active: bool,
    pub color: &'static str,
    pub updated_at: Option<Timestamp>,
}

impl From<TargetView> for TargetResponse {
    fn from(view: TargetView) -> Self {
        Self {
            color: view.color(),
            target_id: view.target_id,
            kind: view.kind,
            display_text: view.display_text,
            is_active: view.is_active,
            updated_at: view.updated_at,
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<TargetResponse>),
    NotFound,
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

/// `GET /api/targets`: every tile in mapping order.
pub async fn list<P>(State(state): State<AppState<P>>) -> Json<Vec<TargetResponse>>
where
    P: CommandPublisher + Send + Sync + 'static,
{
    Json(
        state
            .dashboard
            .targets()
            .into_iter()
            .map(TargetResponse::from)
            .collect(),
    )
}

/// `GET /api/targets/{id}`: one tile.
pub async fn get<P>(State(state): State<AppState<P>>, Path(id): Path<String>) -> GetResponse
where
    P: CommandPublisher + Send + Sync + 'static,
{
    match state.dashboard.target(&id) {
        Some(view) => GetResponse::Ok(Json(TargetResponse::from(view))),
        None => GetResponse::NotFound,
    }
}
