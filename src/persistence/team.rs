//! Team records.

use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Database;
use crate::error::GatewayError;

/// A competing team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Team {
    /// Team number.
    pub id: i32,
    /// Official (sponsor) name.
    pub name: String,
    /// Short name shown on displays.
    pub nickname: String,
    /// Home city.
    pub city: String,
    /// Home state or province.
    pub state_prov: String,
    /// Home country.
    pub country: String,
    /// First competition season.
    pub rookie_year: i32,
    /// Robot name for this season.
    pub robot_name: String,
}

impl Team {
    /// Id-only stand-in for a team whose record is missing.
    #[must_use]
    pub fn placeholder(id: i32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl Database {
    /// Stores a new team.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for a non-positive or taken
    /// team number, [`GatewayError::Storage`] on database failure.
    pub fn create_team(&self, team: &Team) -> Result<(), GatewayError> {
        if team.id <= 0 {
            return Err(GatewayError::Validation(format!(
                "team number must be positive, got {}",
                team.id
            )));
        }
        let record = serde_json::to_string(team)?;
        self.with_conn(|conn| {
            match conn.execute(
                "INSERT INTO teams (id, record) VALUES (?1, ?2)",
                params![team.id, record],
            ) {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(GatewayError::Validation(format!("team {} already exists", team.id)))
                }
                Err(err) => Err(err.into()),
            }
        })
    }

    /// Fetches one team.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the team is unknown,
    /// [`GatewayError::Storage`] on database failure.
    pub fn get_team_by_id(&self, id: i32) -> Result<Team, GatewayError> {
        let record = self.with_conn(|conn| {
            Ok(conn
                .query_row("SELECT record FROM teams WHERE id = ?1", params![id], |row| {
                    row.get::<_, String>(0)
                })
                .optional()?)
        })?;
        let record = record.ok_or_else(|| GatewayError::not_found("team", id))?;
        Ok(serde_json::from_str(&record)?)
    }

    /// Overwrites an existing team.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the team is unknown.
    pub fn update_team(&self, team: &Team) -> Result<(), GatewayError> {
        let record = serde_json::to_string(team)?;
        let changed = self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE teams SET record = ?2 WHERE id = ?1",
                params![team.id, record],
            )?)
        })?;
        if changed == 0 {
            return Err(GatewayError::not_found("team", team.id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn create_get_update() {
        let Ok(db) = Database::open_in_memory() else {
            panic!("in-memory database");
        };
        let mut team = Team {
            id: 254,
            nickname: "The Cheesy Poofs".to_string(),
            city: "San Jose".to_string(),
            rookie_year: 1999,
            ..Team::default()
        };
        assert!(db.create_team(&team).is_ok());
        assert_eq!(db.get_team_by_id(254).ok(), Some(team.clone()));

        team.robot_name = "Lightning".to_string();
        assert!(db.update_team(&team).is_ok());
        assert_eq!(db.get_team_by_id(254).ok(), Some(team));

        let Err(err) = db.get_team_by_id(9999) else {
            panic!("expected not found");
        };
        assert!(err.is_not_found());
        assert!(db.update_team(&Team::placeholder(9999)).is_err());
    }

    #[test]
    fn duplicate_or_zero_number_is_rejected() {
        let Ok(db) = Database::open_in_memory() else {
            panic!("in-memory database");
        };
        assert!(db.create_team(&Team::placeholder(1114)).is_ok());
        assert!(matches!(
            db.create_team(&Team::placeholder(1114)),
            Err(GatewayError::Validation(_))
        ));
        assert!(matches!(
            db.create_team(&Team::placeholder(0)),
            Err(GatewayError::Validation(_))
        ));
    }
}
