//! Team handlers: create, get, update.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};
use crate::persistence::Team;

/// `POST /teams` — Register a team.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] for a non-positive or duplicate
/// team number.
#[utoipa::path(
    post,
    path = "/api/v1/teams",
    tag = "Teams",
    summary = "Create a team",
    request_body = Team,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Invalid team", body = ErrorResponse),
    )
)]
pub async fn create_team(
    State(state): State<AppState>,
    Json(team): Json<Team>,
) -> Result<impl IntoResponse, GatewayError> {
    state.arena.database().create_team(&team)?;
    tracing::info!(team = team.id, nickname = %team.nickname, "team created");
    Ok((StatusCode::CREATED, Json(team)))
}

/// `GET /teams/{id}` — One team.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the team is unknown.
#[utoipa::path(
    get,
    path = "/api/v1/teams/{id}",
    tag = "Teams",
    summary = "Get a team",
    params(("id" = i32, Path, description = "Team number")),
    responses(
        (status = 200, description = "Team", body = Team),
        (status = 404, description = "Team not found", body = ErrorResponse),
    )
)]
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.arena.database().get_team_by_id(id)?))
}

/// `PUT /teams/{id}` — Replace a team record. The path number wins over
/// the id in the body.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the team is unknown.
#[utoipa::path(
    put,
    path = "/api/v1/teams/{id}",
    tag = "Teams",
    summary = "Update a team",
    params(("id" = i32, Path, description = "Team number")),
    request_body = Team,
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 404, description = "Team not found", body = ErrorResponse),
    )
)]
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut team): Json<Team>,
) -> Result<impl IntoResponse, GatewayError> {
    team.id = id;
    state.arena.database().update_team(&team)?;
    Ok(Json(team))
}

/// Team routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teams", post(create_team))
        .route("/teams/{id}", get(get_team).put(update_team))
}
