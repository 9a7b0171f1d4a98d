//! Per-alliance scores as reported by the scoring subsystem.
//!
//! Point values are assigned upstream; this module only aggregates them
//! into the summary shown on displays.

use serde::{Deserialize, Serialize};

/// A penalty assessed against one alliance, credited to the opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foul {
    /// Offending team.
    pub team_id: i32,
    /// Rule reference, e.g. `"G204"`.
    pub rule: String,
    /// Points awarded to the opponent.
    pub points: i32,
}

/// Raw score state for one alliance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Autonomous period points.
    pub auto_points: i32,
    /// Teleoperated period points.
    pub teleop_points: i32,
    /// Endgame points.
    pub endgame_points: i32,
    /// Fouls committed by this alliance.
    pub fouls: Vec<Foul>,
}

/// Aggregated totals for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Points earned on the field.
    pub match_points: i32,
    /// Points awarded from opponent fouls.
    pub foul_points: i32,
    /// Final score.
    pub score: i32,
}

impl Score {
    /// Summarizes this alliance's score given its opponent's fouls.
    #[must_use]
    pub fn summarize(&self, opponent: &Self) -> ScoreSummary {
        let match_points = self.auto_points + self.teleop_points + self.endgame_points;
        let foul_points = opponent.fouls.iter().map(|foul| foul.points).sum();
        ScoreSummary {
            match_points,
            foul_points,
            score: match_points + foul_points,
        }
    }
}

/// Committed result of a played match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Match the result belongs to.
    pub match_id: i32,
    /// Red alliance score.
    pub red_score: Score,
    /// Blue alliance score.
    pub blue_score: Score,
}

impl MatchResult {
    /// Red alliance summary.
    #[must_use]
    pub fn red_summary(&self) -> ScoreSummary {
        self.red_score.summarize(&self.blue_score)
    }

    /// Blue alliance summary.
    #[must_use]
    pub fn blue_summary(&self) -> ScoreSummary {
        self.blue_score.summarize(&self.red_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fouls_credit_the_opponent() {
        let result = MatchResult {
            match_id: 1,
            red_score: Score {
                auto_points: 10,
                teleop_points: 20,
                endgame_points: 5,
                fouls: vec![Foul {
                    team_id: 254,
                    rule: "G204".to_string(),
                    points: 6,
                }],
            },
            blue_score: Score {
                teleop_points: 12,
                ..Score::default()
            },
        };

        let red = result.red_summary();
        assert_eq!(red.match_points, 35);
        assert_eq!(red.foul_points, 0);
        assert_eq!(red.score, 35);

        let blue = result.blue_summary();
        assert_eq!(blue.foul_points, 6);
        assert_eq!(blue.score, 18);
    }
}
