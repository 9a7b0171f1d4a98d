//! The fixed catalog of arena channels.

use std::collections::BTreeMap;

use super::devices::SccStatus;
use super::display::{
    AllianceStationDisplayMode, AudienceDisplayMode, Display, DisplayMap, EventStatus,
};
use super::snapshots::{
    self, ArenaStatus, FieldLightsMessage, LowerThirdMessage, MatchLoad, MatchTimeMessage,
    RealtimeScore, ScorePosted,
};
use super::state::ArenaState;
use crate::domain::{Channel, Feed, SubscriberId};
use crate::error::GatewayError;
use crate::game::MatchTiming;
use crate::persistence::Alliance;

/// Names of every channel, in catalog order.
pub const CHANNEL_NAMES: [&str; 16] = [
    "allianceSelection",
    "allianceStationDisplayMode",
    "arenaStatus",
    "audienceDisplayMode",
    "displayConfiguration",
    "eventStatus",
    "lowerThird",
    "matchLoad",
    "matchTime",
    "matchTiming",
    "playSound",
    "realtimeScore",
    "reload",
    "scorePosted",
    "fieldLights",
    "sccStatus",
];

/// A channel looked up by name, tagged with the source its generator
/// reads so the caller knows which lock to take.
#[derive(Clone, Copy)]
pub enum FeedRef<'a> {
    /// Generator reads [`ArenaState`].
    Arena(&'a dyn Feed<ArenaState>),
    /// Generator reads the display registry.
    Displays(&'a dyn Feed<DisplayMap>),
}

impl std::fmt::Debug for FeedRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arena(feed) => write!(f, "FeedRef::Arena({})", feed.name()),
            Self::Displays(feed) => write!(f, "FeedRef::Displays({})", feed.name()),
        }
    }
}

impl FeedRef<'_> {
    /// Channel name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arena(feed) => feed.name(),
            Self::Displays(feed) => feed.name(),
        }
    }

    /// Whether the channel has a generator.
    #[must_use]
    pub fn has_generator(&self) -> bool {
        match self {
            Self::Arena(feed) => feed.has_generator(),
            Self::Displays(feed) => feed.has_generator(),
        }
    }

    /// Number of attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        match self {
            Self::Arena(feed) => feed.subscriber_count(),
            Self::Displays(feed) => feed.subscriber_count(),
        }
    }

    /// Detaches a subscriber.
    pub fn detach(&self, id: SubscriberId) -> bool {
        match self {
            Self::Arena(feed) => feed.detach(id),
            Self::Displays(feed) => feed.detach(id),
        }
    }
}

/// All sixteen arena channels, created once at startup.
#[derive(Debug)]
pub struct ArenaChannels {
    /// Alliances during selection.
    pub alliance_selection: Channel<ArenaState, Vec<Alliance>>,
    /// Driver station screen mode.
    pub alliance_station_display_mode: Channel<ArenaState, AllianceStationDisplayMode>,
    /// Field readiness.
    pub arena_status: Channel<ArenaState, ArenaStatus>,
    /// Audience screen mode.
    pub audience_display_mode: Channel<ArenaState, AudienceDisplayMode>,
    /// Display registry.
    pub display_configuration: Channel<DisplayMap, BTreeMap<String, Display>>,
    /// Schedule status.
    pub event_status: Channel<ArenaState, EventStatus>,
    /// Audience caption.
    pub lower_third: Channel<ArenaState, LowerThirdMessage>,
    /// Newly loaded match.
    pub match_load: Channel<ArenaState, MatchLoad>,
    /// Match clock.
    pub match_time: Channel<ArenaState, MatchTimeMessage>,
    /// Stage durations.
    pub match_timing: Channel<ArenaState, MatchTiming>,
    /// Sound cues; payloads supplied by the caller.
    pub play_sound: Channel<ArenaState, String>,
    /// Live score.
    pub realtime_score: Channel<ArenaState, RealtimeScore>,
    /// Reload command for displays; null payload.
    pub reload: Channel<ArenaState, ()>,
    /// Posted result.
    pub score_posted: Channel<ArenaState, ScorePosted>,
    /// Field lights.
    pub field_lights: Channel<ArenaState, FieldLightsMessage>,
    /// Secure-comms peers.
    pub scc_status: Channel<ArenaState, SccStatus>,
}

impl Default for ArenaChannels {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaChannels {
    /// Builds the catalog with its generators.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alliance_selection: Channel::new("allianceSelection", snapshots::alliance_selection),
            alliance_station_display_mode: Channel::new(
                "allianceStationDisplayMode",
                snapshots::alliance_station_display_mode,
            ),
            arena_status: Channel::new("arenaStatus", snapshots::arena_status),
            audience_display_mode: Channel::new(
                "audienceDisplayMode",
                snapshots::audience_display_mode,
            ),
            display_configuration: Channel::new(
                "displayConfiguration",
                snapshots::display_configuration,
            ),
            event_status: Channel::new("eventStatus", snapshots::event_status),
            lower_third: Channel::new("lowerThird", snapshots::lower_third),
            match_load: Channel::new("matchLoad", snapshots::match_load),
            match_time: Channel::new("matchTime", snapshots::match_time),
            match_timing: Channel::new("matchTiming", snapshots::match_timing),
            play_sound: Channel::without_generator("playSound"),
            realtime_score: Channel::new("realtimeScore", snapshots::realtime_score),
            reload: Channel::without_generator("reload"),
            score_posted: Channel::new("scorePosted", snapshots::score_posted),
            field_lights: Channel::new("fieldLights", snapshots::field_lights),
            scc_status: Channel::new("sccStatus", snapshots::scc_status),
        }
    }

    /// Finds a channel by name.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::UnknownChannel`] for names outside the
    /// catalog.
    pub fn lookup(&self, name: &str) -> Result<FeedRef<'_>, GatewayError> {
        let feed = match name {
            "allianceSelection" => FeedRef::Arena(&self.alliance_selection),
            "allianceStationDisplayMode" => FeedRef::Arena(&self.alliance_station_display_mode),
            "arenaStatus" => FeedRef::Arena(&self.arena_status),
            "audienceDisplayMode" => FeedRef::Arena(&self.audience_display_mode),
            "displayConfiguration" => FeedRef::Displays(&self.display_configuration),
            "eventStatus" => FeedRef::Arena(&self.event_status),
            "lowerThird" => FeedRef::Arena(&self.lower_third),
            "matchLoad" => FeedRef::Arena(&self.match_load),
            "matchTime" => FeedRef::Arena(&self.match_time),
            "matchTiming" => FeedRef::Arena(&self.match_timing),
            "playSound" => FeedRef::Arena(&self.play_sound),
            "realtimeScore" => FeedRef::Arena(&self.realtime_score),
            "reload" => FeedRef::Arena(&self.reload),
            "scorePosted" => FeedRef::Arena(&self.score_posted),
            "fieldLights" => FeedRef::Arena(&self.field_lights),
            "sccStatus" => FeedRef::Arena(&self.scc_status),
            other => return Err(GatewayError::UnknownChannel(other.to_string())),
        };
        Ok(feed)
    }

    /// Every channel in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = FeedRef<'_>> {
        CHANNEL_NAMES
            .iter()
            .filter_map(move |name| self.lookup(name).ok())
    }

    /// Detaches `id` from every channel. Returns how many channels it was
    /// attached to.
    pub fn detach_all(&self, id: SubscriberId) -> usize {
        self.iter().filter(|feed| feed.detach(id)).count()
    }
}
