//! Event settings handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};
use crate::persistence::EventSettings;

/// `GET /settings` — Current event settings.
///
/// # Errors
///
/// Returns [`GatewayError::Storage`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    tag = "Settings",
    summary = "Get event settings",
    description = "Returns the event settings, creating the default row on first access.",
    responses(
        (status = 200, description = "Event settings", body = EventSettings),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, GatewayError> {
    let settings = state.arena.database().get_event_settings()?;
    Ok(Json(settings))
}

/// `PUT /settings` — Replace event settings.
///
/// The stored row id always wins over the id in the body.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for non-positive alliance
/// counts, [`GatewayError::Storage`] on database failure.
#[utoipa::path(
    put,
    path = "/api/v1/settings",
    tag = "Settings",
    summary = "Update event settings",
    description = "Persists new event settings and republishes the match timing to subscribed displays.",
    request_body = EventSettings,
    responses(
        (status = 200, description = "Updated settings", body = EventSettings),
        (status = 400, description = "Invalid settings", body = ErrorResponse),
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(mut settings): Json<EventSettings>,
) -> Result<impl IntoResponse, GatewayError> {
    if settings.num_elim_alliances <= 0 {
        return Err(GatewayError::InvalidRequest(
            "num_elim_alliances must be positive".to_string(),
        ));
    }
    settings.id = state.arena.database().get_event_settings()?.id;
    let updated = state.arena.update_settings(settings).await?;
    Ok(Json(updated))
}

/// Settings routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
