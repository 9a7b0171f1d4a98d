//! Display handlers: screen modes, display registry, reload and sounds.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{post, put};
use axum::{Json, Router};

use crate::api::dto::{
    AllianceStationModeRequest, AudienceModeRequest, DeliveryResponse, PlaySoundRequest,
};
use crate::app_state::AppState;
use crate::arena::Display;
use crate::error::{ErrorResponse, GatewayError};

/// `PUT /displays/audience` — Switch the audience screen.
#[utoipa::path(
    put,
    path = "/api/v1/displays/audience",
    tag = "Displays",
    summary = "Set audience display mode",
    request_body = AudienceModeRequest,
    responses(
        (status = 204, description = "Mode applied and broadcast"),
    )
)]
pub async fn set_audience_mode(
    State(state): State<AppState>,
    Json(req): Json<AudienceModeRequest>,
) -> impl IntoResponse {
    state.arena.set_audience_display_mode(req.mode).await;
    axum::http::StatusCode::NO_CONTENT
}

/// `PUT /displays/alliance-station` — Switch the driver station screens.
#[utoipa::path(
    put,
    path = "/api/v1/displays/alliance-station",
    tag = "Displays",
    summary = "Set alliance station display mode",
    request_body = AllianceStationModeRequest,
    responses(
        (status = 204, description = "Mode applied and broadcast"),
    )
)]
pub async fn set_alliance_station_mode(
    State(state): State<AppState>,
    Json(req): Json<AllianceStationModeRequest>,
) -> impl IntoResponse {
    state.arena.set_alliance_station_display_mode(req.mode).await;
    axum::http::StatusCode::NO_CONTENT
}

/// `PUT /displays/{id}` — Register or reconfigure a display.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for an empty id.
#[utoipa::path(
    put,
    path = "/api/v1/displays/{id}",
    tag = "Displays",
    summary = "Configure a display",
    description = "Inserts or replaces a display; the path id overrides the id in the body. The new registry is broadcast on displayConfiguration.",
    params(("id" = String, Path, description = "Display id")),
    request_body = Display,
    responses(
        (status = 200, description = "Stored display", body = Display),
        (status = 400, description = "Invalid display", body = ErrorResponse),
    )
)]
pub async fn put_display(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut display): Json<Display>,
) -> Result<impl IntoResponse, GatewayError> {
    if id.trim().is_empty() {
        return Err(GatewayError::InvalidRequest("display id is empty".to_string()));
    }
    display.id = id;
    state.arena.update_display(display.clone()).await;
    Ok(Json(display))
}

/// `POST /displays/reload` — Ask every display to reload.
///
/// # Errors
///
/// Returns [`GatewayError::Serialization`] if the frame cannot be rendered.
#[utoipa::path(
    post,
    path = "/api/v1/displays/reload",
    tag = "Displays",
    summary = "Reload all displays",
    responses(
        (status = 200, description = "Reload broadcast", body = DeliveryResponse),
    )
)]
pub async fn reload_displays(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let delivered = state.arena.reload_displays()?;
    Ok(Json(DeliveryResponse {
        channel: "reload",
        delivered,
    }))
}

/// `POST /sounds` — Play a sound cue on every subscribed display.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for an empty sound name.
#[utoipa::path(
    post,
    path = "/api/v1/sounds",
    tag = "Displays",
    summary = "Play a sound",
    request_body = PlaySoundRequest,
    responses(
        (status = 200, description = "Sound broadcast", body = DeliveryResponse),
        (status = 400, description = "Invalid sound", body = ErrorResponse),
    )
)]
pub async fn play_sound(
    State(state): State<AppState>,
    Json(req): Json<PlaySoundRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    if req.sound.trim().is_empty() {
        return Err(GatewayError::InvalidRequest("sound name is empty".to_string()));
    }
    let delivered = state.arena.play_sound(&req.sound)?;
    Ok(Json(DeliveryResponse {
        channel: "playSound",
        delivered,
    }))
}

/// Display routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/displays/audience", put(set_audience_mode))
        .route("/displays/alliance-station", put(set_alliance_station_mode))
        .route("/displays/reload", post(reload_displays))
        .route("/displays/{id}", put(put_display))
        .route("/sounds", post(play_sound))
}
