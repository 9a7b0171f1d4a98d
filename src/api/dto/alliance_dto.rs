//! Alliance DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query of `GET /alliances/{id}/off-field-teams`: the three teams on
/// the field. Missing slots count as empty (`0`).
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct OnFieldQuery {
    /// Station 1 team.
    #[serde(default)]
    pub team1: i32,
    /// Station 2 team.
    #[serde(default)]
    pub team2: i32,
    /// Station 3 team.
    #[serde(default)]
    pub team3: i32,
}

impl OnFieldQuery {
    /// The three slots as an array.
    #[must_use]
    pub const fn slots(&self) -> [i32; 3] {
        [self.team1, self.team2, self.team3]
    }
}

/// Response of `GET /alliances/{id}/off-field-teams`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OffFieldTeamsResponse {
    /// Alliance id.
    pub alliance_id: i32,
    /// Teams that were on the field.
    pub on_field: Vec<i32>,
    /// Roster members sitting out, in roster order.
    pub off_field: Vec<i32>,
}
