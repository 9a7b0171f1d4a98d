//! The arena: the live aggregate, its channels and its snapshot
//! generators.

pub mod bracket;
pub mod channels;
pub mod context;
pub mod devices;
pub mod display;
pub mod snapshots;
pub mod state;

pub use bracket::{Matchup, PlayoffBracket, StaticBracket};
pub use channels::{ArenaChannels, CHANNEL_NAMES, FeedRef};
pub use context::{Arena, StationUpdate};
pub use devices::{Devices, SccStatus, StaticDeviceStatus};
pub use display::{
    AllianceStationDisplayMode, AudienceDisplayMode, Display, DisplayMap, DisplayType,
    EventStatus, LowerThird,
};
pub use state::{AllianceColor, AllianceStation, ArenaState, LookupPolicy, MatchState};
