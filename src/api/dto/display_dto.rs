//! Display and sound DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::arena::{AllianceStationDisplayMode, AudienceDisplayMode};

/// Body of `PUT /displays/audience`.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct AudienceModeRequest {
    /// New audience screen mode.
    pub mode: AudienceDisplayMode,
}

/// Body of `PUT /displays/alliance-station`.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct AllianceStationModeRequest {
    /// New driver station screen mode.
    pub mode: AllianceStationDisplayMode,
}

/// Body of `POST /sounds`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlaySoundRequest {
    /// Sound cue name, e.g. `"match_start"`.
    pub sound: String,
}
