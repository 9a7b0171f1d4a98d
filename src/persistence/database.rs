//! Connection handle and schema migrations.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

use crate::error::GatewayError;

/// Shared handle to the event database.
///
/// `rusqlite` is synchronous, so the connection sits behind an
/// `Arc<Mutex<_>>`; clones share the same connection.
#[derive(Debug, Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) the database file, enables WAL mode and runs
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] if the file cannot be opened or a
    /// migration fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        let db = Self::init(conn)?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Opens a private in-memory database with the full schema.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] if a migration fails.
    pub fn open_in_memory() -> Result<Self, GatewayError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Self, GatewayError> {
        migrations().to_latest(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` with exclusive access to the connection.
    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, GatewayError>,
    ) -> Result<T, GatewayError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| GatewayError::Storage("database lock poisoned".to_string()))?;
        f(&conn)
    }
}

/// Schema history. Tracked through SQLite's `user_version` pragma.
fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(
        "CREATE TABLE event_settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    record TEXT NOT NULL
);

CREATE TABLE alliances (
    id INTEGER PRIMARY KEY,
    team_ids TEXT NOT NULL,
    lineup_1 INTEGER NOT NULL DEFAULT 0,
    lineup_2 INTEGER NOT NULL DEFAULT 0,
    lineup_3 INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE teams (
    id INTEGER PRIMARY KEY,
    record TEXT NOT NULL
);

CREATE TABLE rankings (
    team_id INTEGER PRIMARY KEY,
    rank INTEGER NOT NULL,
    record TEXT NOT NULL
);

CREATE INDEX idx_rankings_rank ON rankings(rank);",
    )])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_valid() {
        assert!(migrations().validate().is_ok());
    }

    #[test]
    fn in_memory_database_opens() {
        assert!(Database::open_in_memory().is_ok());
    }
}
