//! Match record as loaded into the arena.

use serde::{Deserialize, Serialize};

/// Stage of the event a match belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Ad hoc test match.
    #[default]
    Test,
    /// Practice match.
    Practice,
    /// Qualification match.
    Qualification,
    /// Playoff match tied to a bracket matchup.
    Elimination,
}

impl MatchType {
    /// Display label shown on audience screens.
    #[must_use]
    pub const fn capitalized(&self) -> &'static str {
        match self {
            Self::Test => "Test",
            Self::Practice => "Practice",
            Self::Qualification => "Qualification",
            Self::Elimination => "Playoff",
        }
    }
}

/// One scheduled or ad hoc match.
///
/// Team slots hold `0` when empty. `elim_red_alliance` and
/// `elim_blue_alliance` hold `0` (no alliance assigned) for anything but
/// elimination matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Match id.
    pub id: i32,
    /// Match stage.
    pub match_type: MatchType,
    /// Short name, e.g. `"Q12"`.
    pub display_name: String,
    /// Bracket round (elimination only).
    pub elim_round: i32,
    /// Bracket group within the round (elimination only).
    pub elim_group: i32,
    /// Red station 1 team.
    pub red1: i32,
    /// Red station 2 team.
    pub red2: i32,
    /// Red station 3 team.
    pub red3: i32,
    /// Blue station 1 team.
    pub blue1: i32,
    /// Blue station 2 team.
    pub blue2: i32,
    /// Blue station 3 team.
    pub blue3: i32,
    /// Red playoff alliance id, `0` if none.
    pub elim_red_alliance: i32,
    /// Blue playoff alliance id, `0` if none.
    pub elim_blue_alliance: i32,
}

impl Match {
    /// Returns `true` for playoff matches.
    #[must_use]
    pub fn is_elimination(&self) -> bool {
        self.match_type == MatchType::Elimination
    }

    /// Team assigned to each station, keyed by station name.
    #[must_use]
    pub const fn station_assignments(&self) -> [(&'static str, i32); 6] {
        [
            ("R1", self.red1),
            ("R2", self.red2),
            ("R3", self.red3),
            ("B1", self.blue1),
            ("B2", self.blue2),
            ("B3", self.blue3),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elimination_label_is_playoff() {
        assert_eq!(MatchType::Elimination.capitalized(), "Playoff");
        assert_eq!(MatchType::Qualification.capitalized(), "Qualification");
    }

    #[test]
    fn station_assignments_follow_slots() {
        let m = Match {
            red1: 254,
            blue3: 1114,
            ..Match::default()
        };
        let stations = m.station_assignments();
        assert!(stations.contains(&("R1", 254)));
        assert!(stations.contains(&("B3", 1114)));
        assert!(stations.contains(&("R2", 0)));
        assert!(!m.is_elimination());
    }
}
