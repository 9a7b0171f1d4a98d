//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::arena::Arena;
use crate::config::GatewayConfig;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Arena context: aggregate, channels and data store.
    pub arena: Arc<Arena>,
    /// Runtime configuration.
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Bundles the arena with its configuration.
    #[must_use]
    pub fn new(arena: Arc<Arena>, config: GatewayConfig) -> Self {
        Self {
            arena,
            config: Arc::new(config),
        }
    }
}
