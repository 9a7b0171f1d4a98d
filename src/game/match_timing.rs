//! Stage durations for a match.

use serde::{Deserialize, Serialize};

/// Length of each match stage, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTiming {
    /// Pre-match warmup.
    pub warmup_duration_sec: u32,
    /// Autonomous period.
    pub auto_duration_sec: u32,
    /// Pause between autonomous and teleoperated.
    pub pause_duration_sec: u32,
    /// Teleoperated period.
    pub teleop_duration_sec: u32,
    /// Remaining time at which the end-of-match warning fires.
    pub warning_remaining_duration_sec: u32,
}

impl Default for MatchTiming {
    fn default() -> Self {
        Self {
            warmup_duration_sec: 0,
            auto_duration_sec: 15,
            pause_duration_sec: 2,
            teleop_duration_sec: 135,
            warning_remaining_duration_sec: 30,
        }
    }
}
