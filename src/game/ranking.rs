//! Qualification ranking record.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Tallies that determine a team's rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RankingFields {
    /// Ranking points earned.
    pub ranking_points: i32,
    /// Cumulative match points (first tiebreaker).
    pub match_points: i32,
    /// Cumulative autonomous points (second tiebreaker).
    pub auto_points: i32,
    /// Wins.
    pub wins: i32,
    /// Losses.
    pub losses: i32,
    /// Ties.
    pub ties: i32,
    /// Disqualifications.
    pub disqualifications: i32,
    /// Matches played.
    pub played: i32,
}

/// A team's position in the qualification standings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ranking {
    /// Team the ranking belongs to.
    pub team_id: i32,
    /// Current rank (1 is best).
    pub rank: i32,
    /// Rank before the last posted match.
    pub previous_rank: i32,
    /// Underlying tallies.
    pub fields: RankingFields,
}
