//! Game records shared by the arena, the data store and the snapshot
//! payloads: matches, stage timing, scores and rankings.

pub mod match_record;
pub mod match_timing;
pub mod ranking;
pub mod score;

pub use match_record::{Match, MatchType};
pub use match_timing::MatchTiming;
pub use ranking::{Ranking, RankingFields};
pub use score::{Foul, MatchResult, Score, ScoreSummary};
