//! Off-field roster computation for playoff alliances.

use crate::error::GatewayError;
use crate::game::Match;
use crate::persistence::Database;

/// Alliance id meaning "no alliance assigned" (non-playoff matches).
pub const NO_ALLIANCE: i32 = 0;

/// Computes the alliance members that are not on the field for a match.
#[derive(Debug, Clone)]
pub struct RosterService {
    db: Database,
}

impl RosterService {
    /// Creates a new `RosterService` backed by `db`.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns every roster member of `alliance_id` that is not one of the
    /// three `on_field` teams, in roster order and without de-duplication.
    ///
    /// [`NO_ALLIANCE`] yields an empty list. An on-field id that is not on
    /// the roster has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the alliance does not exist,
    /// [`GatewayError::Storage`] on database failure.
    pub fn off_field_team_ids(
        &self,
        alliance_id: i32,
        on_field: [i32; 3],
    ) -> Result<Vec<i32>, GatewayError> {
        if alliance_id == NO_ALLIANCE {
            return Ok(Vec::new());
        }
        let alliance = self.db.get_alliance_by_id(alliance_id)?;
        Ok(roster_difference(&alliance.team_ids, on_field))
    }

    /// Off-field ids for the red and blue alliances of `m`.
    ///
    /// # Errors
    ///
    /// Fails if either side's alliance cannot be resolved; no partial
    /// result is returned.
    pub fn off_field_team_ids_for_match(
        &self,
        m: &Match,
    ) -> Result<(Vec<i32>, Vec<i32>), GatewayError> {
        let red = self.off_field_team_ids(m.elim_red_alliance, [m.red1, m.red2, m.red3])?;
        let blue = self.off_field_team_ids(m.elim_blue_alliance, [m.blue1, m.blue2, m.blue3])?;
        Ok((red, blue))
    }
}

/// Order-preserving `roster \ on_field`.
#[must_use]
pub fn roster_difference(roster: &[i32], on_field: [i32; 3]) -> Vec<i32> {
    roster
        .iter()
        .copied()
        .filter(|team| !on_field.contains(team))
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::game::MatchType;
    use crate::persistence::Alliance;

    fn service_with(alliances: &[Alliance]) -> RosterService {
        let Ok(db) = Database::open_in_memory() else {
            panic!("in-memory database");
        };
        for alliance in alliances {
            if db.create_alliance(alliance).is_err() {
                panic!("alliance {} rejected", alliance.id);
            }
        }
        RosterService::new(db)
    }

    fn alliance(id: i32, team_ids: &[i32]) -> Alliance {
        Alliance {
            id,
            team_ids: team_ids.to_vec(),
            lineup: [0; 3],
        }
    }

    #[test]
    fn full_lineup_leaves_the_fourth_pick() {
        let service = service_with(&[alliance(1, &[100, 200, 300, 400])]);
        assert_eq!(
            service.off_field_team_ids(1, [100, 200, 300]).ok(),
            Some(vec![400])
        );
    }

    #[test]
    fn stray_on_field_id_has_no_effect() {
        let service = service_with(&[alliance(1, &[100, 200, 300, 400])]);
        assert_eq!(
            service.off_field_team_ids(1, [100, 200, 999]).ok(),
            Some(vec![300, 400])
        );
    }

    #[test]
    fn no_alliance_is_empty() {
        let service = service_with(&[]);
        assert_eq!(
            service.off_field_team_ids(NO_ALLIANCE, [1, 2, 3]).ok(),
            Some(Vec::new())
        );
    }

    #[test]
    fn missing_alliance_propagates() {
        let service = service_with(&[]);
        let Err(err) = service.off_field_team_ids(4, [1, 2, 3]) else {
            panic!("expected lookup failure");
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn duplicates_and_order_are_preserved() {
        assert_eq!(
            roster_difference(&[500, 100, 500, 200], [100, 0, 0]),
            vec![500, 500, 200]
        );
    }

    #[test]
    fn match_resolves_both_sides() {
        let service = service_with(&[
            alliance(1, &[100, 200, 300, 400]),
            alliance(2, &[500, 600, 700]),
        ]);
        let m = Match {
            match_type: MatchType::Elimination,
            red1: 400,
            red2: 200,
            red3: 300,
            blue1: 500,
            blue2: 600,
            blue3: 700,
            elim_red_alliance: 1,
            elim_blue_alliance: 2,
            ..Match::default()
        };
        assert_eq!(
            service.off_field_team_ids_for_match(&m).ok(),
            Some((vec![100], Vec::new()))
        );

        let broken = Match {
            elim_blue_alliance: 9,
            ..m
        };
        assert!(service.off_field_team_ids_for_match(&broken).is_err());
    }
}
