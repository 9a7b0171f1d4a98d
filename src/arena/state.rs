//! The arena aggregate: everything the snapshot generators read.
//!
//! [`ArenaState`] is owned by [`Arena`](super::Arena) behind an async mutex
//! and is only ever read by generators while that lock is held. It carries
//! handles to the collaborators generators consult (devices, bracket,
//! data store) so that a generator is a plain function of `&ArenaState`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::bracket::PlayoffBracket;
use super::devices::Devices;
use super::display::{AllianceStationDisplayMode, AudienceDisplayMode, EventStatus, LowerThird};
use crate::error::GatewayError;
use crate::game::{Match, MatchResult, MatchTiming, Ranking, Score, ScoreSummary};
use crate::persistence::{Alliance, Database, Team};
use crate::service::RosterService;

/// Station keys in display order.
pub const STATION_NAMES: [&str; 6] = ["R1", "R2", "R3", "B1", "B2", "B3"];

/// Phase of the match lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// Match loaded, waiting to start.
    #[default]
    PreMatch,
    /// Start requested.
    StartMatch,
    /// Warmup.
    WarmupPeriod,
    /// Autonomous.
    AutoPeriod,
    /// Gap between autonomous and teleop.
    PausePeriod,
    /// Teleoperated.
    TeleopPeriod,
    /// Match over, results pending.
    PostMatch,
    /// Field timeout running.
    TimeoutActive,
    /// Field timeout over.
    PostTimeout,
}

impl MatchState {
    /// Whether the match clock is running in this state.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(
            self,
            Self::WarmupPeriod | Self::AutoPeriod | Self::PausePeriod | Self::TeleopPeriod
        )
    }
}

/// Alliance side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AllianceColor {
    /// Red alliance.
    Red,
    /// Blue alliance.
    Blue,
}

/// One of the six driver stations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllianceStation {
    /// Team assigned for the loaded match.
    pub team: Option<Team>,
    /// Station bypassed by the field operator.
    pub bypass: bool,
    /// Emergency stop pressed.
    pub estop: bool,
    /// Autonomous stop pressed.
    pub astop: bool,
    /// Driver station linked over ethernet.
    pub ethernet: bool,
}

/// How snapshot generators treat a failed secondary lookup (team detail,
/// ranking, bracket matchup).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupPolicy {
    /// Abort the snapshot on any failure.
    Propagate,
    /// Substitute a default for a missing record; storage failures still
    /// abort.
    #[default]
    Placeholder,
}

impl LookupPolicy {
    /// Applies the policy to a lookup result.
    ///
    /// # Errors
    ///
    /// Returns the lookup error unless it is a not-found error under
    /// [`LookupPolicy::Placeholder`].
    pub fn resolve<T>(
        self,
        result: Result<T, GatewayError>,
        fallback: impl FnOnce() -> T,
    ) -> Result<T, GatewayError> {
        match result {
            Ok(value) => Ok(value),
            Err(err) if self == Self::Placeholder && err.is_not_found() => Ok(fallback()),
            Err(err) => Err(err),
        }
    }
}

impl FromStr for LookupPolicy {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "placeholder" => Ok(Self::Placeholder),
            other => Err(GatewayError::InvalidRequest(format!(
                "unknown lookup policy: {other}"
            ))),
        }
    }
}

impl fmt::Display for LookupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Propagate => write!(f, "propagate"),
            Self::Placeholder => write!(f, "placeholder"),
        }
    }
}

/// Mutable arena aggregate.
#[derive(Debug)]
pub struct ArenaState {
    /// Match currently loaded on the field.
    pub current_match: Match,
    /// Lifecycle phase of the current match.
    pub match_state: MatchState,
    /// When the match clock started, if it has.
    pub match_start_time: Option<DateTime<Utc>>,
    /// Stations keyed `R1`..`B3`.
    pub alliance_stations: BTreeMap<String, AllianceStation>,
    /// Live red score.
    pub red_score: Score,
    /// Live blue score.
    pub blue_score: Score,
    /// Last match whose score was posted.
    pub saved_match: Match,
    /// Result of `saved_match`.
    pub saved_match_result: MatchResult,
    /// Standings after `saved_match`.
    pub saved_rankings: Vec<Ranking>,
    /// Audience screen mode.
    pub audience_display_mode: AudienceDisplayMode,
    /// Driver station screen mode.
    pub alliance_station_display_mode: AllianceStationDisplayMode,
    /// Schedule status.
    pub event_status: EventStatus,
    /// Caption selected for the audience screen.
    pub lower_third: Option<LowerThird>,
    /// Whether the caption is visible.
    pub show_lower_third: bool,
    /// Alliances as shown during selection.
    pub alliance_selection: Vec<Alliance>,
    /// Stage durations from the event settings.
    pub match_timing: MatchTiming,
    /// Secondary lookup policy for generators.
    pub lookup_policy: LookupPolicy,
    /// Hardware status providers.
    pub devices: Devices,
    /// Playoff bracket.
    pub bracket: Arc<dyn PlayoffBracket>,
    /// Data store.
    pub db: Database,
    /// Off-field roster lookup.
    pub roster: RosterService,
}

impl ArenaState {
    /// Creates an idle arena with empty stations and a default test match.
    #[must_use]
    pub fn new(
        db: Database,
        devices: Devices,
        bracket: Arc<dyn PlayoffBracket>,
        lookup_policy: LookupPolicy,
    ) -> Self {
        let alliance_stations = STATION_NAMES
            .iter()
            .map(|name| ((*name).to_string(), AllianceStation::default()))
            .collect();
        Self {
            current_match: Match::default(),
            match_state: MatchState::PreMatch,
            match_start_time: None,
            alliance_stations,
            red_score: Score::default(),
            blue_score: Score::default(),
            saved_match: Match::default(),
            saved_match_result: MatchResult::default(),
            saved_rankings: Vec::new(),
            audience_display_mode: AudienceDisplayMode::default(),
            alliance_station_display_mode: AllianceStationDisplayMode::default(),
            event_status: EventStatus::default(),
            lower_third: None,
            show_lower_third: false,
            alliance_selection: Vec::new(),
            match_timing: MatchTiming::default(),
            lookup_policy,
            devices,
            roster: RosterService::new(db.clone()),
            bracket,
            db,
        }
    }

    /// Checks whether the loaded match may start now.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MatchNotReady`] naming the first blocking
    /// condition.
    pub fn check_can_start_match(&self) -> Result<(), GatewayError> {
        if self.match_state != MatchState::PreMatch {
            return Err(GatewayError::MatchNotReady(
                "a match is already in progress".to_string(),
            ));
        }
        if self.devices.plc.field_estop() {
            return Err(GatewayError::MatchNotReady(
                "field emergency stop is active".to_string(),
            ));
        }
        for (name, station) in &self.alliance_stations {
            if station.estop || station.astop {
                return Err(GatewayError::MatchNotReady(format!(
                    "station {name} has a stop engaged"
                )));
            }
            if !station.bypass && !station.ethernet {
                return Err(GatewayError::MatchNotReady(format!(
                    "station {name} is neither connected nor bypassed"
                )));
            }
        }
        Ok(())
    }

    /// Whole seconds elapsed on the match clock at `now`; zero while the
    /// clock is not running.
    #[must_use]
    pub fn match_time_sec_at(&self, now: DateTime<Utc>) -> u32 {
        match (self.match_state.is_running(), self.match_start_time) {
            (true, Some(start)) => {
                u32::try_from((now - start).num_seconds().max(0)).unwrap_or(u32::MAX)
            }
            _ => 0,
        }
    }

    /// Whole seconds elapsed on the match clock.
    #[must_use]
    pub fn match_time_sec(&self) -> u32 {
        self.match_time_sec_at(Utc::now())
    }

    /// Live red summary, crediting blue fouls.
    #[must_use]
    pub fn red_score_summary(&self) -> ScoreSummary {
        self.red_score.summarize(&self.blue_score)
    }

    /// Live blue summary, crediting red fouls.
    #[must_use]
    pub fn blue_score_summary(&self) -> ScoreSummary {
        self.blue_score.summarize(&self.red_score)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use chrono::Duration;

    use super::*;
    use crate::arena::bracket::StaticBracket;

    pub(crate) fn idle_state() -> ArenaState {
        let Ok(db) = Database::open_in_memory() else {
            panic!("in-memory database");
        };
        ArenaState::new(
            db,
            Devices::default(),
            Arc::new(StaticBracket::default()),
            LookupPolicy::default(),
        )
    }

    #[test]
    fn new_state_has_six_empty_stations() {
        let state = idle_state();
        assert_eq!(state.alliance_stations.len(), 6);
        assert!(state.alliance_stations.values().all(|s| s.team.is_none()));
    }

    #[test]
    fn cannot_start_until_stations_ready() {
        let mut state = idle_state();
        assert!(matches!(
            state.check_can_start_match(),
            Err(GatewayError::MatchNotReady(_))
        ));

        for station in state.alliance_stations.values_mut() {
            station.bypass = true;
        }
        assert!(state.check_can_start_match().is_ok());

        if let Some(r1) = state.alliance_stations.get_mut("R1") {
            r1.estop = true;
        }
        assert!(state.check_can_start_match().is_err());
    }

    #[test]
    fn match_clock_only_runs_in_play() {
        let mut state = idle_state();
        let start = Utc::now();
        state.match_start_time = Some(start);
        assert_eq!(state.match_time_sec_at(start + Duration::seconds(20)), 0);

        state.match_state = MatchState::AutoPeriod;
        assert_eq!(state.match_time_sec_at(start + Duration::seconds(20)), 20);
        assert_eq!(state.match_time_sec_at(start - Duration::seconds(5)), 0);
    }

    #[test]
    fn placeholder_policy_only_masks_not_found() {
        let missing: Result<i32, GatewayError> = Err(GatewayError::not_found("team", 1));
        assert_eq!(LookupPolicy::Placeholder.resolve(missing, || 0).ok(), Some(0));

        let broken: Result<i32, GatewayError> = Err(GatewayError::Storage("io".to_string()));
        assert!(LookupPolicy::Placeholder.resolve(broken, || 0).is_err());

        let missing: Result<i32, GatewayError> = Err(GatewayError::not_found("team", 1));
        assert!(LookupPolicy::Propagate.resolve(missing, || 0).is_err());
    }

    #[test]
    fn policy_parses_from_config() {
        assert_eq!("propagate".parse::<LookupPolicy>().ok(), Some(LookupPolicy::Propagate));
        assert_eq!(" Placeholder ".parse::<LookupPolicy>().ok(), Some(LookupPolicy::Placeholder));
        assert!("strict".parse::<LookupPolicy>().is_err());
    }
}
