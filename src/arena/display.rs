//! Display registry and display-facing modes.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of screen a display client renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    /// Not yet configured; shows its id for identification.
    #[default]
    Placeholder,
    /// Driver station screen.
    AllianceStation,
    /// Announcer view.
    Announcer,
    /// Audience overlay.
    Audience,
    /// Playoff bracket.
    Bracket,
    /// Field monitor.
    FieldMonitor,
    /// Queueing screen.
    Queueing,
    /// Stream overlay.
    TwitchStream,
}

/// One connected (or previously connected) display client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Display {
    /// Display id, chosen by the client.
    pub id: String,
    /// Operator-assigned label.
    #[serde(default)]
    pub nickname: String,
    /// What the display renders.
    #[serde(default)]
    pub display_type: DisplayType,
    /// Free-form per-type options, e.g. `station = "R1"`.
    #[serde(default)]
    pub configuration: BTreeMap<String, String>,
    /// Number of live connections using this id.
    #[serde(default)]
    pub connection_count: u32,
}

/// Display registry keyed by display id. Guarded by its own lock, separate
/// from the arena state.
pub type DisplayMap = HashMap<String, Display>;

/// What the audience screen shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AudienceDisplayMode {
    /// Nothing.
    #[default]
    Blank,
    /// Pre-match introduction.
    Intro,
    /// Live match overlay.
    Match,
    /// Final score.
    Score,
    /// Event logo.
    Logo,
    /// Alliance selection board.
    AllianceSelection,
    /// Playoff bracket.
    Bracket,
    /// Timeout countdown.
    Timeout,
    /// Sponsor slideshow.
    SponsorSlides,
}

/// What the driver station screens show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AllianceStationDisplayMode {
    /// Nothing.
    Blank,
    /// Team number and match info.
    #[default]
    Match,
    /// Event logo.
    Logo,
    /// Field reset notice.
    FieldReset,
    /// Timeout countdown.
    Timeout,
}

/// Caption shown across the bottom of the audience screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LowerThird {
    /// Record id.
    pub id: i32,
    /// First line.
    pub top_text: String,
    /// Second line.
    #[serde(default)]
    pub bottom_text: String,
    /// Position in the operator's list.
    #[serde(default)]
    pub display_order: i32,
    /// Award the caption belongs to, `0` if none.
    #[serde(default)]
    pub award_id: i32,
}

/// Schedule status shown on the queueing and announcer screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventStatus {
    /// Duration of the last match cycle, e.g. `"7:12"`.
    pub cycle_time: String,
    /// Schedule drift, e.g. `"Event is running 5 minutes late"`.
    pub early_late_message: String,
}
