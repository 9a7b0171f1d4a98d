//! Playoff bracket collaborator.
//!
//! Series progression lives in the bracket engine; the arena only looks
//! up the matchup a playoff match belongs to and renders its status line.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// One best-of-N series between two alliances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    /// Bracket round.
    pub round: i32,
    /// Group within the round.
    pub group: i32,
    /// Red alliance id.
    pub red_alliance_id: i32,
    /// Blue alliance id.
    pub blue_alliance_id: i32,
    /// Matches won by red.
    pub red_alliance_wins: i32,
    /// Matches won by blue.
    pub blue_alliance_wins: i32,
    /// Wins needed to take the series.
    pub num_wins_to_win: i32,
}

impl Matchup {
    /// Returns `(leader, status)`: the leading side (`"red"`, `"blue"` or
    /// empty) and a human-readable series line.
    #[must_use]
    pub fn status_text(&self) -> (String, String) {
        let (red, blue) = (self.red_alliance_wins, self.blue_alliance_wins);
        let (leader, status) = if red >= self.num_wins_to_win && red > 0 {
            ("red", format!("Red Advances {red}-{blue}"))
        } else if blue >= self.num_wins_to_win && blue > 0 {
            ("blue", format!("Blue Advances {blue}-{red}"))
        } else if red > blue {
            ("red", format!("Red Leads {red}-{blue}"))
        } else if blue > red {
            ("blue", format!("Blue Leads {blue}-{red}"))
        } else if red > 0 {
            ("", format!("Series Tied {red}-{blue}"))
        } else {
            ("", String::new())
        };
        (leader.to_string(), status)
    }
}

/// Lookup of bracket matchups.
pub trait PlayoffBracket: Send + Sync + Debug {
    /// Matchup for a bracket position, if it exists.
    fn matchup(&self, round: i32, group: i32) -> Option<Matchup>;
}

/// Bracket backed by a fixed list of matchups.
#[derive(Debug, Clone, Default)]
pub struct StaticBracket {
    matchups: Vec<Matchup>,
}

impl StaticBracket {
    /// Creates a bracket from `matchups`.
    #[must_use]
    pub const fn new(matchups: Vec<Matchup>) -> Self {
        Self { matchups }
    }
}

impl PlayoffBracket for StaticBracket {
    fn matchup(&self, round: i32, group: i32) -> Option<Matchup> {
        self.matchups
            .iter()
            .find(|m| m.round == round && m.group == group)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(red: i32, blue: i32) -> Matchup {
        Matchup {
            round: 1,
            group: 1,
            red_alliance_wins: red,
            blue_alliance_wins: blue,
            num_wins_to_win: 2,
            ..Matchup::default()
        }
    }

    #[test]
    fn status_lines() {
        assert_eq!(series(0, 0).status_text(), (String::new(), String::new()));
        assert_eq!(
            series(1, 0).status_text(),
            ("red".to_string(), "Red Leads 1-0".to_string())
        );
        assert_eq!(
            series(1, 1).status_text(),
            (String::new(), "Series Tied 1-1".to_string())
        );
        assert_eq!(
            series(1, 2).status_text(),
            ("blue".to_string(), "Blue Advances 2-1".to_string())
        );
    }

    #[test]
    fn static_bracket_finds_by_position() {
        let bracket = StaticBracket::new(vec![series(1, 0)]);
        assert!(bracket.matchup(1, 1).is_some());
        assert!(bracket.matchup(2, 1).is_none());
    }
}
