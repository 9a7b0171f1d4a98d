//! System endpoints: health check, channel catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::ChannelInfo;
use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `GET /config/channels` — List the broadcast channels.
#[utoipa::path(
    get,
    path = "/config/channels",
    tag = "System",
    summary = "List broadcast channels",
    description = "Returns every channel a WebSocket client can subscribe to, with its current subscriber count.",
    responses(
        (status = 200, description = "Channel catalog", body = Vec<ChannelInfo>),
    )
)]
pub async fn channels_handler(State(state): State<AppState>) -> impl IntoResponse {
    let channels: Vec<ChannelInfo> = state
        .arena
        .channels()
        .iter()
        .map(|feed| ChannelInfo {
            name: feed.name(),
            has_generator: feed.has_generator(),
            subscriber_count: feed.subscriber_count(),
        })
        .collect();
    (StatusCode::OK, Json(channels))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/channels", get(channels_handler))
}
