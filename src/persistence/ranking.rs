//! Ranking records.

use rusqlite::{OptionalExtension, params};

use super::Database;
use crate::error::GatewayError;
use crate::game::Ranking;

impl Database {
    /// Inserts or replaces a batch of rankings atomically.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on database failure; no ranking
    /// of the batch is written in that case.
    pub fn save_rankings(&self, rankings: &[Ranking]) -> Result<(), GatewayError> {
        let records = rankings
            .iter()
            .map(|ranking| Ok((ranking, serde_json::to_string(ranking)?)))
            .collect::<Result<Vec<_>, GatewayError>>()?;
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            for (ranking, record) in &records {
                tx.execute(
                    "INSERT OR REPLACE INTO rankings (team_id, rank, record) VALUES (?1, ?2, ?3)",
                    params![ranking.team_id, ranking.rank, record],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
    }

    /// Fetches the ranking of one team.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the team has no ranking yet,
    /// [`GatewayError::Storage`] on database failure.
    pub fn get_ranking_for_team(&self, team_id: i32) -> Result<Ranking, GatewayError> {
        let record = self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT record FROM rankings WHERE team_id = ?1",
                    params![team_id],
                    |row| row.get::<_, String>(0),
                )
                .optional()?)
        })?;
        let record = record.ok_or_else(|| GatewayError::not_found("ranking", team_id))?;
        Ok(serde_json::from_str(&record)?)
    }

    /// Lists all rankings, best rank first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on database failure.
    pub fn get_all_rankings(&self) -> Result<Vec<Ranking>, GatewayError> {
        let records = self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT record FROM rankings ORDER BY rank ASC")?;
            let records = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(records)
        })?;
        records
            .iter()
            .map(|record| Ok(serde_json::from_str(record)?))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::game::RankingFields;

    fn ranking(team_id: i32, rank: i32) -> Ranking {
        Ranking {
            team_id,
            rank,
            previous_rank: 0,
            fields: RankingFields {
                ranking_points: 10 - rank,
                played: 4,
                ..RankingFields::default()
            },
        }
    }

    #[test]
    fn rankings_upsert_and_sort() {
        let Ok(db) = Database::open_in_memory() else {
            panic!("in-memory database");
        };
        assert!(db.save_rankings(&[ranking(254, 2), ranking(1114, 1)]).is_ok());
        assert_eq!(db.get_ranking_for_team(254).ok(), Some(ranking(254, 2)));

        assert!(db.save_rankings(&[ranking(254, 3)]).is_ok());
        let Ok(all) = db.get_all_rankings() else {
            panic!("listing failed");
        };
        let order: Vec<(i32, i32)> = all.iter().map(|r| (r.team_id, r.rank)).collect();
        assert_eq!(order, vec![(1114, 1), (254, 3)]);
    }

    #[test]
    fn unranked_team_is_not_found() {
        let Ok(db) = Database::open_in_memory() else {
            panic!("in-memory database");
        };
        let Err(err) = db.get_ranking_for_team(604) else {
            panic!("expected not found");
        };
        assert!(err.is_not_found());
    }
}
