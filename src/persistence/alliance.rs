//! Playoff alliance records.

use rusqlite::{OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Database;
use crate::error::GatewayError;

/// A playoff alliance: an ordered roster plus the three teams currently
/// chosen to play.
///
/// The id is assigned by alliance selection (1 = first seed), never by the
/// store. The roster keeps selection order and is not de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Alliance {
    /// Seed number.
    pub id: i32,
    /// Roster in selection order.
    pub team_ids: Vec<i32>,
    /// Teams in the three playing slots; `0` marks an empty slot.
    #[schema(value_type = Vec<i32>)]
    pub lineup: [i32; 3],
}

impl Alliance {
    /// Checks that the id is positive and every filled lineup slot names a
    /// roster member.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] describing the first problem.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.id <= 0 {
            return Err(GatewayError::Validation(format!(
                "alliance id must be positive, got {}",
                self.id
            )));
        }
        if let Some(stray) = self
            .lineup
            .iter()
            .find(|&&team| team != 0 && !self.team_ids.contains(&team))
        {
            return Err(GatewayError::Validation(format!(
                "lineup team {stray} is not on alliance {}",
                self.id
            )));
        }
        Ok(())
    }
}

const SELECT_ALLIANCE: &str = "SELECT id, team_ids, lineup_1, lineup_2, lineup_3 FROM alliances";

type AllianceRow = (i32, String, i32, i32, i32);

fn read_row(row: &Row<'_>) -> rusqlite::Result<AllianceRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn decode((id, team_ids, l1, l2, l3): AllianceRow) -> Result<Alliance, GatewayError> {
    Ok(Alliance {
        id,
        team_ids: serde_json::from_str(&team_ids)?,
        lineup: [l1, l2, l3],
    })
}

impl Database {
    /// Stores a new alliance under its explicit id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the alliance is inconsistent
    /// or the id is taken, [`GatewayError::Storage`] on database failure.
    pub fn create_alliance(&self, alliance: &Alliance) -> Result<(), GatewayError> {
        alliance.validate()?;
        let team_ids = serde_json::to_string(&alliance.team_ids)?;
        let [l1, l2, l3] = alliance.lineup;
        self.with_conn(|conn| {
            match conn.execute(
                "INSERT INTO alliances (id, team_ids, lineup_1, lineup_2, lineup_3) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![alliance.id, team_ids, l1, l2, l3],
            ) {
                Ok(_) => Ok(()),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(GatewayError::Validation(format!(
                        "alliance {} already exists",
                        alliance.id
                    )))
                }
                Err(err) => Err(err.into()),
            }
        })
    }

    /// Fetches one alliance.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if no alliance has this id,
    /// [`GatewayError::Storage`] on database failure.
    pub fn get_alliance_by_id(&self, id: i32) -> Result<Alliance, GatewayError> {
        let row = self.with_conn(|conn| {
            Ok(conn
                .query_row(&format!("{SELECT_ALLIANCE} WHERE id = ?1"), params![id], read_row)
                .optional()?)
        })?;
        row.map_or_else(|| Err(GatewayError::not_found("alliance", id)), decode)
    }

    /// Replaces the roster and lineup of an existing alliance.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the alliance is inconsistent,
    /// [`GatewayError::NotFound`] if it does not exist.
    pub fn update_alliance(&self, alliance: &Alliance) -> Result<(), GatewayError> {
        alliance.validate()?;
        let team_ids = serde_json::to_string(&alliance.team_ids)?;
        let [l1, l2, l3] = alliance.lineup;
        let changed = self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE alliances SET team_ids = ?2, lineup_1 = ?3, lineup_2 = ?4, lineup_3 = ?5 \
                 WHERE id = ?1",
                params![alliance.id, team_ids, l1, l2, l3],
            )?)
        })?;
        if changed == 0 {
            return Err(GatewayError::not_found("alliance", alliance.id));
        }
        Ok(())
    }

    /// Deletes one alliance.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if it does not exist.
    pub fn delete_alliance(&self, id: i32) -> Result<(), GatewayError> {
        let changed = self
            .with_conn(|conn| Ok(conn.execute("DELETE FROM alliances WHERE id = ?1", params![id])?))?;
        if changed == 0 {
            return Err(GatewayError::not_found("alliance", id));
        }
        Ok(())
    }

    /// Deletes every alliance (event reset).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on database failure.
    pub fn truncate_alliances(&self) -> Result<(), GatewayError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM alliances", [])?;
            Ok(())
        })
    }

    /// Lists all alliances ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on database failure.
    pub fn get_all_alliances(&self) -> Result<Vec<Alliance>, GatewayError> {
        let rows = self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_ALLIANCE} ORDER BY id ASC"))?;
            let rows = stmt
                .query_map([], read_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })?;
        rows.into_iter().map(decode).collect()
    }
}
