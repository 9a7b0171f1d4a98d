//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use super::connection::run_connection;
use crate::app_state::AppState;

/// Query string of the upgrade request.
#[derive(Debug, Default, Deserialize)]
pub struct WsParams {
    /// Comma-separated channel names to join on connect.
    #[serde(default)]
    pub channels: Option<String>,
}

impl WsParams {
    /// Channel names from the query, trimmed, empties dropped.
    #[must_use]
    pub fn channel_list(&self) -> Vec<String> {
        self.channels
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// `GET /ws?channels=a,b` — Upgrade HTTP connection to WebSocket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let arena = Arc::clone(&state.arena);
    let channels = params.channel_list();
    let capacity = state.config.subscriber_queue_capacity;

    ws.on_upgrade(move |socket| run_connection(socket, arena, channels, capacity))
}
