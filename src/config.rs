//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::arena::LookupPolicy;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// SQLite database file.
    pub database_path: PathBuf,

    /// How snapshot generators treat missing secondary records.
    pub lookup_policy: LookupPolicy,

    /// Frames buffered per WebSocket subscriber before new ones are dropped.
    pub subscriber_queue_capacity: usize,

    /// Milliseconds between periodic status republishes.
    pub arena_status_interval_ms: u64,

    /// Per-request timeout for REST endpoints.
    pub request_timeout_secs: u64,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_path: PathBuf::from("arena.db"),
            lookup_policy: LookupPolicy::default(),
            subscriber_queue_capacity: 256,
            arena_status_interval_ms: 1000,
            request_timeout_secs: 10,
            log_json: false,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` or `SNAPSHOT_LOOKUP_POLICY` is set
    /// but cannot be parsed.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let database_path = std::env::var("DATABASE_PATH")
            .map_or(defaults.database_path, PathBuf::from);

        let lookup_policy = match std::env::var("SNAPSHOT_LOOKUP_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.lookup_policy,
        };

        let subscriber_queue_capacity =
            parse_env("SUBSCRIBER_QUEUE_CAPACITY", defaults.subscriber_queue_capacity).max(1);
        let arena_status_interval_ms =
            parse_env("ARENA_STATUS_INTERVAL_MS", defaults.arena_status_interval_ms).max(10);
        let request_timeout_secs =
            parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs);

        let log_json = std::env::var("LOG_FORMAT")
            .is_ok_and(|format| format.eq_ignore_ascii_case("json"));

        Ok(Self {
            listen_addr,
            database_path,
            lookup_policy,
            subscriber_queue_capacity,
            arena_status_interval_ms,
            request_timeout_secs,
            log_json,
        })
    }

    /// Interval of the periodic status task.
    #[must_use]
    pub const fn arena_status_interval(&self) -> Duration {
        Duration::from_millis(self.arena_status_interval_ms)
    }

    /// REST request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
