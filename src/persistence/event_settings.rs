//! Event-wide configuration singleton.

use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Database;
use crate::error::GatewayError;
use crate::game::MatchTiming;

/// Event-level configuration. Exactly one row exists; it is created with
/// [`EventSettings::default`] the first time it is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EventSettings {
    /// Row id (always the first row of the table).
    pub id: i64,
    /// Event name.
    pub name: String,
    /// Playoff format, e.g. `"single"` or `"double"`.
    pub elim_type: String,
    /// Number of playoff alliances.
    pub num_elim_alliances: i32,
    /// Pick order for selection round 2 (`"F"` forward, `"L"` reverse).
    pub selection_round2_order: String,
    /// Pick order for selection round 3, empty if there is no round 3.
    pub selection_round3_order: String,
    /// Whether team data may be downloaded from The Blue Alliance.
    pub tba_download_enabled: bool,
    /// Whether results are published to The Blue Alliance.
    pub tba_publishing_enabled: bool,
    /// The Blue Alliance event code.
    pub tba_event_code: String,
    /// The Blue Alliance API secret id.
    pub tba_secret_id: String,
    /// The Blue Alliance API secret.
    pub tba_secret: String,
    /// Whether the field network uses per-team WPA keys.
    pub network_security_enabled: bool,
    /// Access point address.
    pub ap_address: String,
    /// Access point admin password.
    pub ap_password: String,
    /// Access point Wi-Fi channel.
    pub ap_channel: i32,
    /// Network switch address.
    pub switch_address: String,
    /// Network switch admin password.
    pub switch_password: String,
    /// Field-safety controller address.
    pub plc_address: String,
    /// Operator UI password.
    pub admin_password: String,
    /// Warmup stage length.
    pub warmup_duration_sec: u32,
    /// Autonomous stage length.
    pub auto_duration_sec: u32,
    /// Pause stage length.
    pub pause_duration_sec: u32,
    /// Teleoperated stage length.
    pub teleop_duration_sec: u32,
    /// End-of-match warning threshold.
    pub warning_remaining_duration_sec: u32,
}

impl Default for EventSettings {
    fn default() -> Self {
        let timing = MatchTiming::default();
        Self {
            id: 0,
            name: "Untitled Event".to_string(),
            elim_type: "single".to_string(),
            num_elim_alliances: 8,
            selection_round2_order: "L".to_string(),
            selection_round3_order: String::new(),
            tba_download_enabled: true,
            tba_publishing_enabled: false,
            tba_event_code: String::new(),
            tba_secret_id: String::new(),
            tba_secret: String::new(),
            network_security_enabled: false,
            ap_address: String::new(),
            ap_password: String::new(),
            ap_channel: 36,
            switch_address: String::new(),
            switch_password: String::new(),
            plc_address: String::new(),
            admin_password: String::new(),
            warmup_duration_sec: timing.warmup_duration_sec,
            auto_duration_sec: timing.auto_duration_sec,
            pause_duration_sec: timing.pause_duration_sec,
            teleop_duration_sec: timing.teleop_duration_sec,
            warning_remaining_duration_sec: timing.warning_remaining_duration_sec,
        }
    }
}

impl EventSettings {
    /// Stage durations configured for this event.
    #[must_use]
    pub const fn match_timing(&self) -> MatchTiming {
        MatchTiming {
            warmup_duration_sec: self.warmup_duration_sec,
            auto_duration_sec: self.auto_duration_sec,
            pause_duration_sec: self.pause_duration_sec,
            teleop_duration_sec: self.teleop_duration_sec,
            warning_remaining_duration_sec: self.warning_remaining_duration_sec,
        }
    }
}

impl Database {
    /// Returns the settings row, creating it with defaults if the table is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Storage`] on database failure.
    pub fn get_event_settings(&self) -> Result<EventSettings, GatewayError> {
        self.with_conn(|conn| {
            let existing = conn
                .query_row(
                    "SELECT id, record FROM event_settings ORDER BY id ASC LIMIT 1",
                    [],
                    |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
                )
                .optional()?;

            if let Some((id, record)) = existing {
                let mut settings: EventSettings = serde_json::from_str(&record)?;
                settings.id = id;
                return Ok(settings);
            }

            let mut settings = EventSettings::default();
            conn.execute(
                "INSERT INTO event_settings (record) VALUES (?1)",
                params![serde_json::to_string(&settings)?],
            )?;
            settings.id = conn.last_insert_rowid();
            tracing::info!(id = settings.id, "created default event settings");
            Ok(settings)
        })
    }

    /// Overwrites the settings row identified by `settings.id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the row does not exist,
    /// [`GatewayError::Storage`] on database failure.
    pub fn update_event_settings(&self, settings: &EventSettings) -> Result<(), GatewayError> {
        let record = serde_json::to_string(settings)?;
        let changed = self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE event_settings SET record = ?2 WHERE id = ?1",
                params![settings.id, record],
            )?)
        })?;
        if changed == 0 {
            return Err(GatewayError::not_found("event settings", settings.id));
        }
        Ok(())
    }
}
