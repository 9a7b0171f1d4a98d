//! Qualification standings.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::error::GatewayError;
use crate::game::Ranking;

/// `GET /rankings` — Stored rankings, best rank first.
///
/// # Errors
///
/// Returns [`GatewayError::Storage`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/rankings",
    tag = "Rankings",
    summary = "List rankings",
    responses(
        (status = 200, description = "Rankings in ascending rank order", body = Vec<Ranking>),
    )
)]
pub async fn list_rankings(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.arena.database().get_all_rankings()?))
}

/// Ranking routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/rankings", get(list_rankings))
}
