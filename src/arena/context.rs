//! The arena context object: aggregate, display registry, channels.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use super::bracket::PlayoffBracket;
use super::channels::{ArenaChannels, FeedRef};
use super::devices::Devices;
use super::display::{
    AllianceStationDisplayMode, AudienceDisplayMode, Display, DisplayMap, EventStatus, LowerThird,
};
use super::state::{AllianceColor, AllianceStation, ArenaState, LookupPolicy, MatchState};
use crate::domain::{Endpoint, SubscriberId};
use crate::error::GatewayError;
use crate::game::{Match, MatchResult, Ranking, Score};
use crate::persistence::{Alliance, Database, EventSettings, Team};

/// Partial update of one driver station. `None` leaves a flag unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StationUpdate {
    /// Bypass flag.
    pub bypass: Option<bool>,
    /// Emergency stop.
    pub estop: Option<bool>,
    /// Autonomous stop.
    pub astop: Option<bool>,
    /// Ethernet link.
    pub ethernet: Option<bool>,
}

/// Owns the arena aggregate and the channel catalog.
///
/// Every mutator follows the same pattern: lock the piece of state it
/// owns, mutate, publish the affected channels while still holding the
/// lock, release. Publishing is synchronous, so per-channel frame order
/// matches mutation order.
#[derive(Debug)]
pub struct Arena {
    state: Mutex<ArenaState>,
    displays: Mutex<DisplayMap>,
    channels: ArenaChannels,
    db: Database,
}

impl Arena {
    /// Creates an idle arena.
    #[must_use]
    pub fn new(
        db: Database,
        devices: Devices,
        bracket: Arc<dyn PlayoffBracket>,
        lookup_policy: LookupPolicy,
    ) -> Self {
        Self {
            state: Mutex::new(ArenaState::new(db.clone(), devices, bracket, lookup_policy)),
            displays: Mutex::new(DisplayMap::new()),
            channels: ArenaChannels::new(),
            db,
        }
    }

    /// The channel catalog.
    #[must_use]
    pub const fn channels(&self) -> &ArenaChannels {
        &self.channels
    }

    /// The data store.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Runs `f` against the locked aggregate without publishing.
    pub async fn read_state<R>(&self, f: impl FnOnce(&ArenaState) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }

    /// Attaches `endpoint` to the named channel and sends it the current
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnknownChannel`] for unknown names, or the
    /// initial snapshot error (the endpoint stays attached).
    pub async fn subscribe(&self, name: &str, endpoint: Endpoint) -> Result<(), GatewayError> {
        match self.channels.lookup(name)? {
            FeedRef::Arena(feed) => {
                let state = self.state.lock().await;
                feed.attach(endpoint, &state)
            }
            FeedRef::Displays(feed) => {
                let displays = self.displays.lock().await;
                feed.attach(endpoint, &displays)
            }
        }
    }

    /// Detaches a subscriber from one channel.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnknownChannel`] for unknown names.
    pub fn unsubscribe(&self, name: &str, id: SubscriberId) -> Result<bool, GatewayError> {
        Ok(self.channels.lookup(name)?.detach(id))
    }

    /// Detaches a subscriber from every channel.
    pub fn unsubscribe_all(&self, id: SubscriberId) -> usize {
        self.channels.detach_all(id)
    }

    /// Reads the settings singleton and applies its match timing.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on database failure.
    pub async fn load_settings(&self) -> Result<EventSettings, GatewayError> {
        let mut state = self.state.lock().await;
        let settings = self.db.get_event_settings()?;
        state.match_timing = settings.match_timing();
        self.channels.match_timing.notify(&state);
        tracing::info!(event = %settings.name, "event settings loaded");
        Ok(settings)
    }

    /// Persists new settings and applies their match timing.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the settings row is gone,
    /// [`GatewayError::Storage`] on database failure.
    pub async fn update_settings(
        &self,
        settings: EventSettings,
    ) -> Result<EventSettings, GatewayError> {
        let mut state = self.state.lock().await;
        self.db.update_event_settings(&settings)?;
        state.match_timing = settings.match_timing();
        self.channels.match_timing.notify(&state);
        tracing::info!(event = %settings.name, "event settings updated");
        Ok(settings)
    }

    /// Loads `m` onto the field: assigns teams to stations, resets scores
    /// and the match clock.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] while a match is running,
    /// or a team lookup error not masked by the lookup policy. A failed
    /// `matchLoad` snapshot is returned after the other channels publish;
    /// the match stays loaded.
    pub async fn load_match(&self, m: Match) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        if state.match_state.is_running() {
            return Err(GatewayError::InvalidRequest(
                "cannot load a match while one is in progress".to_string(),
            ));
        }

        let mut stations = state.alliance_stations.clone();
        for (name, team_id) in m.station_assignments() {
            let team = if team_id == 0 {
                None
            } else {
                Some(
                    state
                        .lookup_policy
                        .resolve(self.db.get_team_by_id(team_id), || Team::placeholder(team_id))?,
                )
            };
            stations.insert(
                name.to_string(),
                AllianceStation {
                    team,
                    ..AllianceStation::default()
                },
            );
        }

        tracing::info!(match_id = m.id, name = %m.display_name, "match loaded");
        state.alliance_stations = stations;
        state.current_match = m;
        state.match_state = MatchState::PreMatch;
        state.match_start_time = None;
        state.red_score = Score::default();
        state.blue_score = Score::default();

        let loaded = self.channels.match_load.publish(&state);
        if let Err(err) = &loaded {
            tracing::warn!(channel = "matchLoad", error = %err, "snapshot publish skipped");
        }
        self.channels.match_time.notify(&state);
        self.channels.realtime_score.notify(&state);
        self.channels.arena_status.notify(&state);
        loaded.map(|_| ())
    }

    /// Starts the loaded match.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MatchNotReady`] if the start precondition
    /// does not hold.
    pub async fn start_match(&self) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        state.check_can_start_match()?;
        state.match_state = MatchState::WarmupPeriod;
        state.match_start_time = Some(Utc::now());
        tracing::info!(match_id = state.current_match.id, "match started");

        self.channels.arena_status.notify(&state);
        self.channels.match_time.notify(&state);
        Ok(())
    }

    /// Moves the match to `match_state`, as reported by match control.
    pub async fn set_match_state(&self, match_state: MatchState) {
        let mut state = self.state.lock().await;
        if state.match_state == match_state {
            return;
        }
        tracing::debug!(from = ?state.match_state, to = ?match_state, "match state changed");
        state.match_state = match_state;
        self.channels.arena_status.notify(&state);
        self.channels.match_time.notify(&state);
    }

    /// Updates the flags of one station.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for an unknown station key.
    pub async fn set_station_status(
        &self,
        station: &str,
        update: StationUpdate,
    ) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        let Some(entry) = state.alliance_stations.get_mut(station) else {
            return Err(GatewayError::InvalidRequest(format!(
                "unknown station: {station}"
            )));
        };
        if let Some(bypass) = update.bypass {
            entry.bypass = bypass;
        }
        if let Some(estop) = update.estop {
            entry.estop = estop;
        }
        if let Some(astop) = update.astop {
            entry.astop = astop;
        }
        if let Some(ethernet) = update.ethernet {
            entry.ethernet = ethernet;
        }
        self.channels.arena_status.notify(&state);
        Ok(())
    }

    /// Replaces one alliance's live score.
    pub async fn update_score(&self, color: AllianceColor, score: Score) {
        let mut state = self.state.lock().await;
        match color {
            AllianceColor::Red => state.red_score = score,
            AllianceColor::Blue => state.blue_score = score,
        }
        self.channels.realtime_score.notify(&state);
    }

    /// Commits the result of the loaded match together with the updated
    /// standings.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] if the standings cannot be saved;
    /// nothing is published in that case.
    pub async fn post_score(
        &self,
        result: MatchResult,
        rankings: Vec<Ranking>,
    ) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        self.db.save_rankings(&rankings)?;
        state.saved_match = state.current_match.clone();
        state.saved_match_result = result;
        state.saved_rankings = rankings;
        tracing::info!(match_id = state.saved_match.id, "score posted");
        self.channels.score_posted.notify(&state);
        Ok(())
    }

    /// Switches the audience screen.
    pub async fn set_audience_display_mode(&self, mode: AudienceDisplayMode) {
        let mut state = self.state.lock().await;
        state.audience_display_mode = mode;
        self.channels.audience_display_mode.notify(&state);
    }

    /// Switches the driver station screens.
    pub async fn set_alliance_station_display_mode(&self, mode: AllianceStationDisplayMode) {
        let mut state = self.state.lock().await;
        state.alliance_station_display_mode = mode;
        self.channels.alliance_station_display_mode.notify(&state);
    }

    /// Replaces the schedule status.
    pub async fn set_event_status(&self, status: EventStatus) {
        let mut state = self.state.lock().await;
        state.event_status = status;
        self.channels.event_status.notify(&state);
    }

    /// Selects a caption and sets its visibility.
    pub async fn set_lower_third(&self, lower_third: Option<LowerThird>, show: bool) {
        let mut state = self.state.lock().await;
        state.lower_third = lower_third;
        state.show_lower_third = show;
        self.channels.lower_third.notify(&state);
    }

    /// Replaces the alliances shown during selection.
    pub async fn update_alliance_selection(&self, alliances: Vec<Alliance>) {
        let mut state = self.state.lock().await;
        state.alliance_selection = alliances;
        self.channels.alliance_selection.notify(&state);
    }

    /// Reloads the selection board from the stored alliances.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on database failure.
    pub async fn refresh_alliance_selection(&self) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        state.alliance_selection = self.db.get_all_alliances()?;
        self.channels.alliance_selection.notify(&state);
        Ok(())
    }

    /// Inserts or replaces a display in the registry.
    pub async fn update_display(&self, display: Display) {
        let mut displays = self.displays.lock().await;
        let id = display.id.clone();
        tracing::debug!(display = %id, "display updated");
        displays.insert(id, display);
        self.channels.display_configuration.notify(&displays);
    }

    /// Removes a display. Returns `false` if it was not registered.
    pub async fn remove_display(&self, id: &str) -> bool {
        let mut displays = self.displays.lock().await;
        let removed = displays.remove(id).is_some();
        if removed {
            self.channels.display_configuration.notify(&displays);
        }
        removed
    }

    /// Copy of one registered display.
    pub async fn display(&self, id: &str) -> Option<Display> {
        self.displays.lock().await.get(id).cloned()
    }

    /// Asks every subscribed display to play a sound cue.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Serialization`] if the frame cannot be
    /// rendered.
    pub fn play_sound(&self, sound: &str) -> Result<usize, GatewayError> {
        self.channels.play_sound.publish_payload(sound.to_string())
    }

    /// Asks every subscribed display to reload itself.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Serialization`] if the frame cannot be
    /// rendered.
    pub fn reload_displays(&self) -> Result<usize, GatewayError> {
        tracing::info!("reloading all displays");
        self.channels.reload.publish_payload(())
    }

    /// Republishes the field light state after the lights changed.
    pub async fn publish_field_lights(&self) {
        let state = self.state.lock().await;
        self.channels.field_lights.notify(&state);
    }

    /// Republishes the secure-comms status after a peer changed.
    pub async fn publish_scc_status(&self) {
        let state = self.state.lock().await;
        self.channels.scc_status.notify(&state);
        self.channels.arena_status.notify(&state);
    }

    /// Periodic refresh of the status and clock channels.
    pub async fn tick(&self) {
        let state = self.state.lock().await;
        self.channels.arena_status.notify(&state);
        if state.match_state.is_running() {
            self.channels.match_time.notify(&state);
        }
    }
}
