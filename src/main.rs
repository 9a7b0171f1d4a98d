//! arena-gateway server entry point.
//!
//! Opens the data store, builds the arena and starts the Axum HTTP server
//! with REST and WebSocket endpoints.

use std::sync::Arc;

use anyhow::Context;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use arena_gateway::api;
use arena_gateway::app_state::AppState;
use arena_gateway::arena::{Arena, Devices, StaticBracket};
use arena_gateway::config::GatewayConfig;
use arena_gateway::persistence::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env()
        .map_err(|err| anyhow::anyhow!("invalid configuration: {err}"))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(
        addr = %config.listen_addr,
        database = %config.database_path.display(),
        lookup_policy = %config.lookup_policy,
        "starting arena-gateway"
    );

    // Build persistence and arena
    let db = Database::open(&config.database_path)
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let arena = Arc::new(Arena::new(
        db,
        Devices::default(),
        Arc::new(StaticBracket::default()),
        config.lookup_policy,
    ));
    arena.load_settings().await?;
    arena.refresh_alliance_selection().await?;

    // Periodic status refresh
    let ticker = Arc::clone(&arena);
    let interval = config.arena_status_interval();
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticks.tick().await;
            ticker.tick().await;
        }
    });

    // Build router
    let listen_addr = config.listen_addr;
    let app = api::build_app(AppState::new(arena, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(addr = %listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
