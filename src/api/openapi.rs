//! OpenAPI document for the operator REST surface.

use utoipa::OpenApi;

use super::dto::{
    AllianceStationModeRequest, AudienceModeRequest, ChannelInfo, DeliveryResponse,
    OffFieldTeamsResponse,
};
use super::handlers::{alliance, display, ranking, settings, system, team};
use crate::arena::{AllianceStationDisplayMode, AudienceDisplayMode, Display, DisplayType};
use crate::error::{ErrorBody, ErrorResponse};
use crate::game::{Ranking, RankingFields};
use crate::persistence::{Alliance, EventSettings, Team};

/// Aggregated OpenAPI document.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "arena-gateway",
        description = "Operator API and channel catalog of the arena broadcast gateway."
    ),
    paths(
        system::health_handler,
        system::channels_handler,
        settings::get_settings,
        settings::update_settings,
        alliance::list_alliances,
        alliance::create_alliance,
        alliance::get_alliance,
        alliance::off_field_teams,
        display::set_audience_mode,
        display::set_alliance_station_mode,
        display::put_display,
        display::reload_displays,
        display::play_sound,
        team::create_team,
        team::get_team,
        team::update_team,
        ranking::list_rankings,
    ),
    components(schemas(
        system::HealthResponse,
        ChannelInfo,
        DeliveryResponse,
        OffFieldTeamsResponse,
        AudienceModeRequest,
        AllianceStationModeRequest,
        super::dto::PlaySoundRequest,
        AudienceDisplayMode,
        AllianceStationDisplayMode,
        Display,
        DisplayType,
        Alliance,
        EventSettings,
        Team,
        Ranking,
        RankingFields,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "System", description = "Health and channel catalog"),
        (name = "Settings", description = "Event settings singleton"),
        (name = "Alliances", description = "Playoff alliances"),
        (name = "Displays", description = "Display modes, registry and cues"),
        (name = "Teams", description = "Team records"),
        (name = "Rankings", description = "Qualification standings"),
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/swagger-ui`, serving the document at
/// `/api-docs/openapi.json`.
#[cfg(feature = "swagger-ui")]
pub fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
