//! Alliance handlers: list, create, get, off-field roster.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{OffFieldTeamsResponse, OnFieldQuery};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};
use crate::persistence::Alliance;
use crate::service::RosterService;

/// `GET /alliances` — All alliances ordered by id.
///
/// # Errors
///
/// Returns [`GatewayError::Storage`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/alliances",
    tag = "Alliances",
    summary = "List alliances",
    responses(
        (status = 200, description = "Alliances in ascending id order", body = Vec<Alliance>),
    )
)]
pub async fn list_alliances(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.arena.database().get_all_alliances()?))
}

/// `POST /alliances` — Store an alliance and refresh the selection board.
///
/// # Errors
///
/// Returns [`GatewayError::Validation`] for a duplicate id or a lineup
/// team outside the roster.
#[utoipa::path(
    post,
    path = "/api/v1/alliances",
    tag = "Alliances",
    summary = "Create an alliance",
    description = "Stores an alliance under its seed number. Every filled lineup slot must name a roster member.",
    request_body = Alliance,
    responses(
        (status = 201, description = "Alliance created", body = Alliance),
        (status = 400, description = "Invalid alliance", body = ErrorResponse),
    )
)]
pub async fn create_alliance(
    State(state): State<AppState>,
    Json(alliance): Json<Alliance>,
) -> Result<impl IntoResponse, GatewayError> {
    state.arena.database().create_alliance(&alliance)?;
    state.arena.refresh_alliance_selection().await?;
    tracing::info!(alliance = alliance.id, teams = ?alliance.team_ids, "alliance created");
    Ok((StatusCode::CREATED, Json(alliance)))
}

/// `GET /alliances/{id}` — One alliance.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the alliance does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/alliances/{id}",
    tag = "Alliances",
    summary = "Get an alliance",
    params(("id" = i32, Path, description = "Alliance seed number")),
    responses(
        (status = 200, description = "Alliance", body = Alliance),
        (status = 404, description = "Alliance not found", body = ErrorResponse),
    )
)]
pub async fn get_alliance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, GatewayError> {
    Ok(Json(state.arena.database().get_alliance_by_id(id)?))
}

/// `GET /alliances/{id}/off-field-teams` — Roster members not on the field.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the alliance does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/alliances/{id}/off-field-teams",
    tag = "Alliances",
    summary = "Off-field alliance members",
    description = "Returns the roster members that are not among the three given on-field teams. Alliance 0 means no alliance and yields an empty list.",
    params(("id" = i32, Path, description = "Alliance seed number"), OnFieldQuery),
    responses(
        (status = 200, description = "Off-field team ids", body = OffFieldTeamsResponse),
        (status = 404, description = "Alliance not found", body = ErrorResponse),
    )
)]
pub async fn off_field_teams(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<OnFieldQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let roster = RosterService::new(state.arena.database().clone());
    let off_field = roster.off_field_team_ids(id, query.slots())?;
    Ok(Json(OffFieldTeamsResponse {
        alliance_id: id,
        on_field: query.slots().to_vec(),
        off_field,
    }))
}

/// Alliance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/alliances", get(list_alliances).post(create_alliance))
        .route("/alliances/{id}", get(get_alliance))
        .route("/alliances/{id}/off-field-teams", get(off_field_teams))
}
