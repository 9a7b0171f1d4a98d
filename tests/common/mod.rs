//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;

use arena_gateway::app_state::AppState;
use arena_gateway::arena::{Arena, Devices, LookupPolicy, StaticBracket};
use arena_gateway::config::GatewayConfig;
use arena_gateway::persistence::Database;

/// App state over a fresh in-memory database.
pub fn app_state() -> AppState {
    let Ok(db) = Database::open_in_memory() else {
        panic!("in-memory database");
    };
    let arena = Arc::new(Arena::new(
        db,
        Devices::default(),
        Arc::new(StaticBracket::default()),
        LookupPolicy::Placeholder,
    ));
    AppState::new(
        arena,
        GatewayConfig {
            subscriber_queue_capacity: 32,
            ..GatewayConfig::default()
        },
    )
}
