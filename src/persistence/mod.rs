//! Persistence layer: embedded SQLite store for event records.
//!
//! [`Database`] wraps a single `rusqlite` connection behind a mutex.
//! Records that the snapshot generators resolve (alliances, teams,
//! rankings) and the singleton [`EventSettings`] row live here. Lookups
//! are synchronous so generators can call them while the caller holds the
//! arena lock.

pub mod alliance;
pub mod database;
pub mod event_settings;
pub mod ranking;
pub mod team;

pub use alliance::Alliance;
pub use database::Database;
pub use event_settings::EventSettings;
pub use team::Team;
