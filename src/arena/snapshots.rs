//! Snapshot generators, one per channel.
//!
//! Each generator is a pure projection of the locked source into an owned
//! payload. Absent substructure is rendered as an explicit empty value so
//! clients never have to distinguish "missing" from "empty". Secondary
//! lookups (team detail, rankings, bracket matchups) go through the
//! state's [`LookupPolicy`](super::state::LookupPolicy); roster lookups
//! always propagate.

use std::collections::BTreeMap;

use serde::Serialize;

use super::bracket::Matchup;
use super::devices::SccStatus;
use super::display::{
    AllianceStationDisplayMode, AudienceDisplayMode, Display, DisplayMap, EventStatus, LowerThird,
};
use super::state::{AllianceStation, ArenaState, MatchState};
use crate::error::GatewayError;
use crate::game::{Match, MatchTiming, Ranking, Score, ScoreSummary};
use crate::persistence::{Alliance, Team};

/// `arenaStatus` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArenaStatus {
    /// Loaded match id.
    pub match_id: i32,
    /// Stations keyed `R1`..`B3`.
    pub alliance_stations: BTreeMap<String, AllianceStation>,
    /// Match phase.
    pub match_state: MatchState,
    /// Whether the start precondition currently holds.
    pub can_start_match: bool,
    /// Access point status label.
    pub access_point_status: String,
    /// Switch status label.
    pub switch_status: String,
    /// PLC health.
    pub plc_is_healthy: bool,
    /// Field e-stop.
    pub field_estop: bool,
    /// Zone safety blocks.
    pub plc_armor_block_statuses: BTreeMap<String, bool>,
    /// Scoring table secure-comms link.
    pub scoring_scc_connected: bool,
    /// Red secure-comms link.
    pub red_scc_connected: bool,
    /// Blue secure-comms link.
    pub blue_scc_connected: bool,
}

/// `lowerThird` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowerThirdMessage {
    /// Selected caption, if any.
    pub lower_third: Option<LowerThird>,
    /// Whether it is visible.
    pub show_lower_third: bool,
}

/// `matchLoad` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchLoad {
    /// Display label of the match type.
    pub match_type: String,
    /// Loaded match.
    #[serde(rename = "match")]
    pub match_info: Match,
    /// Team per station; `null` for an empty station.
    pub teams: BTreeMap<String, Option<Team>>,
    /// Ranking per on-field team id; `null` when the team is unranked.
    pub rankings: BTreeMap<String, Option<Ranking>>,
    /// Series the match belongs to (playoffs only).
    pub matchup: Option<Matchup>,
    /// Red alliance members sitting out.
    pub red_off_field_teams: Vec<Team>,
    /// Blue alliance members sitting out.
    pub blue_off_field_teams: Vec<Team>,
}

/// `matchTime` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchTimeMessage {
    /// Match phase.
    pub match_state: MatchState,
    /// Seconds on the match clock.
    pub match_time_sec: u32,
}

/// Score plus summary for one alliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllianceScoreFields {
    /// Raw score.
    pub score: Score,
    /// Totals, crediting opponent fouls.
    pub score_summary: ScoreSummary,
}

/// `realtimeScore` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RealtimeScore {
    /// Red side.
    pub red: AllianceScoreFields,
    /// Blue side.
    pub blue: AllianceScoreFields,
    /// Match phase.
    pub match_state: MatchState,
}

/// `scorePosted` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorePosted {
    /// Display label of the match type.
    pub match_type: String,
    /// Posted match.
    #[serde(rename = "match")]
    pub match_info: Match,
    /// Red totals.
    pub red_score_summary: ScoreSummary,
    /// Blue totals.
    pub blue_score_summary: ScoreSummary,
    /// Standings keyed by team id.
    pub rankings: BTreeMap<i32, Ranking>,
    /// Series line, e.g. `"Red Leads 1-0"`; empty outside playoffs.
    pub series_status: String,
    /// Leading side, `"red"`, `"blue"` or empty.
    pub series_leader: String,
}

/// `fieldLights` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldLightsMessage {
    /// Lighting state label.
    pub lights: String,
}

/// Alliances as currently shown during selection.
///
/// # Errors
///
/// Infallible; the signature matches the generator contract.
pub fn alliance_selection(state: &ArenaState) -> Result<Vec<Alliance>, GatewayError> {
    Ok(state.alliance_selection.clone())
}

/// Driver station screen mode.
///
/// # Errors
///
/// Infallible.
pub fn alliance_station_display_mode(
    state: &ArenaState,
) -> Result<AllianceStationDisplayMode, GatewayError> {
    Ok(state.alliance_station_display_mode)
}

/// Field and device readiness.
///
/// # Errors
///
/// Infallible.
pub fn arena_status(state: &ArenaState) -> Result<ArenaStatus, GatewayError> {
    let devices = &state.devices;
    Ok(ArenaStatus {
        match_id: state.current_match.id,
        alliance_stations: state.alliance_stations.clone(),
        match_state: state.match_state,
        can_start_match: state.check_can_start_match().is_ok(),
        access_point_status: devices.access_point.status(),
        switch_status: devices.network_switch.status(),
        plc_is_healthy: devices.plc.is_healthy(),
        field_estop: devices.plc.field_estop(),
        plc_armor_block_statuses: devices.plc.armor_block_statuses(),
        scoring_scc_connected: devices.scc.is_connected("scoring"),
        red_scc_connected: devices.scc.is_connected("red"),
        blue_scc_connected: devices.scc.is_connected("blue"),
    })
}

/// Audience screen mode.
///
/// # Errors
///
/// Infallible.
pub fn audience_display_mode(state: &ArenaState) -> Result<AudienceDisplayMode, GatewayError> {
    Ok(state.audience_display_mode)
}

/// Copy of the display registry. The caller must hold the display lock;
/// the returned map shares nothing with it.
///
/// # Errors
///
/// Infallible.
pub fn display_configuration(
    displays: &DisplayMap,
) -> Result<BTreeMap<String, Display>, GatewayError> {
    Ok(displays
        .iter()
        .map(|(id, display)| (id.clone(), display.clone()))
        .collect())
}

/// Schedule status.
///
/// # Errors
///
/// Infallible.
pub fn event_status(state: &ArenaState) -> Result<EventStatus, GatewayError> {
    Ok(state.event_status.clone())
}

/// Caption and its visibility.
///
/// # Errors
///
/// Infallible.
pub fn lower_third(state: &ArenaState) -> Result<LowerThirdMessage, GatewayError> {
    Ok(LowerThirdMessage {
        lower_third: state.lower_third.clone(),
        show_lower_third: state.show_lower_third,
    })
}

/// Everything a display needs when a new match is loaded.
///
/// Outside playoffs the matchup is `null` and both off-field lists are
/// empty without consulting the store.
///
/// # Errors
///
/// Returns the roster lookup error, or a secondary lookup error when the
/// lookup policy does not mask it.
pub fn match_load(state: &ArenaState) -> Result<MatchLoad, GatewayError> {
    let policy = state.lookup_policy;
    let current = &state.current_match;

    let teams = state
        .alliance_stations
        .iter()
        .map(|(name, station)| (name.clone(), station.team.clone()))
        .collect();

    let mut rankings = BTreeMap::new();
    for team in state.alliance_stations.values().filter_map(|s| s.team.as_ref()) {
        let ranking = policy.resolve(
            state.db.get_ranking_for_team(team.id).map(Some),
            || None,
        )?;
        rankings.insert(team.id.to_string(), ranking);
    }

    let (matchup, red_off_field_teams, blue_off_field_teams) = if current.is_elimination() {
        let matchup = lookup_matchup(state, current)?;
        let (red_ids, blue_ids) = state.roster.off_field_team_ids_for_match(current)?;
        (
            matchup,
            resolve_teams(state, &red_ids)?,
            resolve_teams(state, &blue_ids)?,
        )
    } else {
        (None, Vec::new(), Vec::new())
    };

    Ok(MatchLoad {
        match_type: current.match_type.capitalized().to_string(),
        match_info: current.clone(),
        teams,
        rankings,
        matchup,
        red_off_field_teams,
        blue_off_field_teams,
    })
}

/// Match phase and clock.
///
/// # Errors
///
/// Infallible.
pub fn match_time(state: &ArenaState) -> Result<MatchTimeMessage, GatewayError> {
    Ok(MatchTimeMessage {
        match_state: state.match_state,
        match_time_sec: state.match_time_sec(),
    })
}

/// Stage durations.
///
/// # Errors
///
/// Infallible.
pub fn match_timing(state: &ArenaState) -> Result<MatchTiming, GatewayError> {
    Ok(state.match_timing)
}

/// Live scores.
///
/// # Errors
///
/// Infallible.
pub fn realtime_score(state: &ArenaState) -> Result<RealtimeScore, GatewayError> {
    Ok(RealtimeScore {
        red: AllianceScoreFields {
            score: state.red_score.clone(),
            score_summary: state.red_score_summary(),
        },
        blue: AllianceScoreFields {
            score: state.blue_score.clone(),
            score_summary: state.blue_score_summary(),
        },
        match_state: state.match_state,
    })
}

/// Last posted result with standings and, for playoffs, the series line.
///
/// # Errors
///
/// Returns the matchup lookup error when the lookup policy does not mask
/// it.
pub fn score_posted(state: &ArenaState) -> Result<ScorePosted, GatewayError> {
    let saved = &state.saved_match;
    let (series_leader, series_status) = if saved.is_elimination() {
        lookup_matchup(state, saved)?
            .map(|matchup| matchup.status_text())
            .unwrap_or_default()
    } else {
        (String::new(), String::new())
    };

    let rankings = state
        .saved_rankings
        .iter()
        .map(|ranking| (ranking.team_id, *ranking))
        .collect();

    Ok(ScorePosted {
        match_type: saved.match_type.capitalized().to_string(),
        match_info: saved.clone(),
        red_score_summary: state.saved_match_result.red_summary(),
        blue_score_summary: state.saved_match_result.blue_summary(),
        rankings,
        series_status,
        series_leader,
    })
}

/// Field lighting state.
///
/// # Errors
///
/// Infallible.
pub fn field_lights(state: &ArenaState) -> Result<FieldLightsMessage, GatewayError> {
    Ok(FieldLightsMessage {
        lights: state.devices.lights.current_state(),
    })
}

/// Secure-comms peers.
///
/// # Errors
///
/// Infallible.
pub fn scc_status(state: &ArenaState) -> Result<SccStatus, GatewayError> {
    Ok(state.devices.scc.status())
}

fn lookup_matchup(state: &ArenaState, m: &Match) -> Result<Option<Matchup>, GatewayError> {
    let found = state
        .bracket
        .matchup(m.elim_round, m.elim_group)
        .map(Some)
        .ok_or_else(|| GatewayError::not_found("matchup", m.elim_group));
    state.lookup_policy.resolve(found, || None)
}

fn resolve_teams(state: &ArenaState, ids: &[i32]) -> Result<Vec<Team>, GatewayError> {
    ids.iter()
        .map(|&id| {
            state
                .lookup_policy
                .resolve(state.db.get_team_by_id(id), || Team::placeholder(id))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::arena::bracket::StaticBracket;
    use crate::arena::devices::{Devices, SccPeerStatus, StaticDeviceStatus};
    use crate::arena::state::LookupPolicy;
    use crate::arena::state::tests::idle_state;
    use crate::game::{MatchResult, MatchType, RankingFields};

    fn team(id: i32, nickname: &str) -> Team {
        Team {
            id,
            nickname: nickname.to_string(),
            ..Team::default()
        }
    }

    fn playoff_match() -> Match {
        Match {
            id: 42,
            match_type: MatchType::Elimination,
            display_name: "F1".to_string(),
            elim_round: 4,
            elim_group: 1,
            red1: 100,
            red2: 200,
            red3: 300,
            blue1: 500,
            blue2: 600,
            blue3: 700,
            elim_red_alliance: 1,
            elim_blue_alliance: 2,
        }
    }

    fn seed_playoffs(state: &ArenaState) {
        for (id, name) in [(100, "A"), (200, "B"), (300, "C"), (400, "D"), (500, "E")] {
            assert!(state.db.create_team(&team(id, name)).is_ok());
        }
        let red = Alliance {
            id: 1,
            team_ids: vec![100, 200, 300, 400],
            lineup: [100, 200, 300],
        };
        let blue = Alliance {
            id: 2,
            team_ids: vec![500, 600, 700, 800],
            lineup: [500, 600, 700],
        };
        assert!(state.db.create_alliance(&red).is_ok());
        assert!(state.db.create_alliance(&blue).is_ok());
    }

    #[test]
    fn non_playoff_match_load_has_no_bracket_data() {
        let mut state = idle_state();
        state.current_match = Match {
            id: 7,
            match_type: MatchType::Qualification,
            display_name: "Q7".to_string(),
            red1: 254,
            ..Match::default()
        };
        if let Some(r1) = state.alliance_stations.get_mut("R1") {
            r1.team = Some(team(254, "Poofs"));
        }

        let Ok(load) = match_load(&state) else {
            panic!("match load failed");
        };
        assert_eq!(load.match_type, "Qualification");
        assert!(load.matchup.is_none());
        assert!(load.red_off_field_teams.is_empty());
        assert!(load.blue_off_field_teams.is_empty());
        assert_eq!(load.teams.len(), 6);
        assert_eq!(load.teams.get("B2"), Some(&None));
        assert_eq!(load.rankings.get("254"), Some(&None));

        let Ok(json) = serde_json::to_value(&load) else {
            panic!("serialize failed");
        };
        assert!(json["matchup"].is_null());
        assert_eq!(json["red_off_field_teams"], serde_json::json!([]));
        assert_eq!(json["match"]["display_name"], "Q7");
    }

    #[test]
    fn playoff_match_load_lists_off_field_teams() {
        let mut state = idle_state();
        seed_playoffs(&state);
        state.current_match = playoff_match();
        state.bracket = Arc::new(StaticBracket::new(vec![Matchup {
            round: 4,
            group: 1,
            red_alliance_id: 1,
            blue_alliance_id: 2,
            num_wins_to_win: 2,
            ..Matchup::default()
        }]));

        let Ok(load) = match_load(&state) else {
            panic!("match load failed");
        };
        assert_eq!(load.match_type, "Playoff");
        assert!(load.matchup.is_some());
        assert_eq!(load.red_off_field_teams, vec![team(400, "D")]);
        // 800 has no team record; the placeholder keeps its id.
        assert_eq!(load.blue_off_field_teams, vec![Team::placeholder(800)]);
    }

    #[test]
    fn propagate_policy_aborts_on_missing_matchup() {
        let mut state = idle_state();
        seed_playoffs(&state);
        state.current_match = playoff_match();
        state.lookup_policy = LookupPolicy::Propagate;

        let Err(err) = match_load(&state) else {
            panic!("expected missing matchup to abort");
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_alliance_always_aborts_match_load() {
        let mut state = idle_state();
        state.current_match = playoff_match();
        let Err(err) = match_load(&state) else {
            panic!("expected roster failure");
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn display_copy_is_independent() {
        let mut displays = DisplayMap::new();
        displays.insert(
            "100".to_string(),
            Display {
                id: "100".to_string(),
                nickname: "Field".to_string(),
                ..Display::default()
            },
        );
        let Ok(copy) = display_configuration(&displays) else {
            panic!("copy failed");
        };

        if let Some(display) = displays.get_mut("100") {
            display.nickname = "Renamed".to_string();
        }
        displays.remove("100");

        assert_eq!(copy.len(), 1);
        assert_eq!(copy.get("100").map(|d| d.nickname.as_str()), Some("Field"));
    }

    #[test]
    fn arena_status_reports_devices() {
        let mut status = StaticDeviceStatus {
            access_point_status: "ACTIVE".to_string(),
            plc_healthy: true,
            ..StaticDeviceStatus::default()
        };
        status.scc.peers.insert(
            "scoring".to_string(),
            SccPeerStatus {
                connected: true,
                message: String::new(),
            },
        );
        let mut state = idle_state();
        state.devices = Devices::uniform(Arc::new(status));

        let Ok(snapshot) = arena_status(&state) else {
            panic!("status failed");
        };
        assert_eq!(snapshot.access_point_status, "ACTIVE");
        assert!(snapshot.plc_is_healthy);
        assert!(snapshot.scoring_scc_connected);
        assert!(!snapshot.red_scc_connected);
        assert!(!snapshot.can_start_match);
    }

    #[test]
    fn score_posted_summarizes_series() {
        let mut state = idle_state();
        state.saved_match = playoff_match();
        state.saved_match_result = MatchResult {
            match_id: 42,
            red_score: Score {
                teleop_points: 30,
                ..Score::default()
            },
            blue_score: Score::default(),
        };
        state.saved_rankings = vec![Ranking {
            team_id: 100,
            rank: 1,
            previous_rank: 2,
            fields: RankingFields::default(),
        }];
        state.bracket = Arc::new(StaticBracket::new(vec![Matchup {
            round: 4,
            group: 1,
            red_alliance_wins: 1,
            num_wins_to_win: 2,
            ..Matchup::default()
        }]));

        let Ok(posted) = score_posted(&state) else {
            panic!("score posted failed");
        };
        assert_eq!(posted.series_leader, "red");
        assert_eq!(posted.series_status, "Red Leads 1-0");
        assert_eq!(posted.red_score_summary.score, 30);
        assert_eq!(posted.rankings.get(&100).map(|r| r.rank), Some(1));

        let Ok(json) = serde_json::to_value(&posted) else {
            panic!("serialize failed");
        };
        assert_eq!(json["rankings"]["100"]["rank"], 1);
    }

    #[test]
    fn score_posted_outside_playoffs_has_blank_series() {
        let state = idle_state();
        let Ok(posted) = score_posted(&state) else {
            panic!("score posted failed");
        };
        assert_eq!(posted.match_type, "Test");
        assert!(posted.series_status.is_empty());
        assert!(posted.series_leader.is_empty());
    }

    #[test]
    fn realtime_score_credits_fouls() {
        let mut state = idle_state();
        state.red_score.auto_points = 10;
        state.blue_score.fouls.push(crate::game::Foul {
            team_id: 500,
            rule: "G204".to_string(),
            points: 5,
        });

        let Ok(score) = realtime_score(&state) else {
            panic!("realtime score failed");
        };
        assert_eq!(score.red.score_summary.score, 15);
        assert_eq!(score.blue.score_summary.score, 0);
    }
}
