//! REST endpoint handlers organized by resource.

pub mod alliance;
pub mod display;
pub mod ranking;
pub mod settings;
pub mod system;
pub mod team;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(settings::routes())
        .merge(alliance::routes())
        .merge(display::routes())
        .merge(team::routes())
        .merge(ranking::routes())
}
