//! Hardware status providers consumed by the arena.
//!
//! Polling the physical devices happens elsewhere; the arena only reads
//! the latest status each provider reports. Every accessor is a cheap,
//! non-blocking read so it can run inside a snapshot generator.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Field-safety controller (PLC).
pub trait FieldSafetyController: Send + Sync + Debug {
    /// Whether the controller is reachable and reporting.
    fn is_healthy(&self) -> bool;

    /// Whether the field emergency stop is engaged.
    fn field_estop(&self) -> bool;

    /// Safety-block status per field zone; `true` means the zone is clear.
    fn armor_block_statuses(&self) -> BTreeMap<String, bool>;
}

/// Field Wi-Fi access point.
pub trait AccessPoint: Send + Sync + Debug {
    /// Configuration status label, e.g. `"ACTIVE"`.
    fn status(&self) -> String;
}

/// Field network switch.
pub trait NetworkSwitch: Send + Sync + Debug {
    /// Configuration status label, e.g. `"ACTIVE"`.
    fn status(&self) -> String;
}

/// Link state of one secure-comms peer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SccPeerStatus {
    /// Whether the peer is connected.
    pub connected: bool,
    /// Last status line reported by the peer.
    pub message: String,
}

/// Snapshot of every secure-comms peer, keyed by peer name
/// (`"scoring"`, `"red"`, `"blue"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SccStatus {
    /// Per-peer status.
    pub peers: BTreeMap<String, SccPeerStatus>,
}

/// Secure-comms clients.
pub trait SecureComms: Send + Sync + Debug {
    /// Whether the named peer is connected.
    fn is_connected(&self, peer: &str) -> bool;

    /// Full status of all peers.
    fn status(&self) -> SccStatus;
}

/// Field lighting controller.
pub trait FieldLights: Send + Sync + Debug {
    /// Label of the current lighting state, e.g. `"Red"`, `"Off"`.
    fn current_state(&self) -> String;
}

/// Handles to every hardware provider.
#[derive(Debug, Clone)]
pub struct Devices {
    /// Field-safety controller.
    pub plc: Arc<dyn FieldSafetyController>,
    /// Access point.
    pub access_point: Arc<dyn AccessPoint>,
    /// Network switch.
    pub network_switch: Arc<dyn NetworkSwitch>,
    /// Secure-comms clients.
    pub scc: Arc<dyn SecureComms>,
    /// Field lights.
    pub lights: Arc<dyn FieldLights>,
}

impl Devices {
    /// Uses one provider for every device.
    #[must_use]
    pub fn uniform(status: Arc<StaticDeviceStatus>) -> Self {
        Self {
            plc: Arc::clone(&status) as Arc<dyn FieldSafetyController>,
            access_point: Arc::clone(&status) as Arc<dyn AccessPoint>,
            network_switch: Arc::clone(&status) as Arc<dyn NetworkSwitch>,
            scc: Arc::clone(&status) as Arc<dyn SecureComms>,
            lights: status,
        }
    }
}

impl Default for Devices {
    fn default() -> Self {
        Self::uniform(Arc::new(StaticDeviceStatus::default()))
    }
}

/// Fixed device readings. Used until real pollers are attached, and in
/// tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDeviceStatus {
    /// PLC health.
    pub plc_healthy: bool,
    /// Field e-stop.
    pub field_estop: bool,
    /// Zone safety blocks.
    pub armor_blocks: BTreeMap<String, bool>,
    /// Access point status label.
    pub access_point_status: String,
    /// Switch status label.
    pub switch_status: String,
    /// Secure-comms peers.
    pub scc: SccStatus,
    /// Lighting state label.
    pub lights: String,
}

impl Default for StaticDeviceStatus {
    fn default() -> Self {
        Self {
            plc_healthy: false,
            field_estop: false,
            armor_blocks: BTreeMap::new(),
            access_point_status: "UNKNOWN".to_string(),
            switch_status: "UNKNOWN".to_string(),
            scc: SccStatus::default(),
            lights: "Off".to_string(),
        }
    }
}

impl FieldSafetyController for StaticDeviceStatus {
    fn is_healthy(&self) -> bool {
        self.plc_healthy
    }

    fn field_estop(&self) -> bool {
        self.field_estop
    }

    fn armor_block_statuses(&self) -> BTreeMap<String, bool> {
        self.armor_blocks.clone()
    }
}

impl AccessPoint for StaticDeviceStatus {
    fn status(&self) -> String {
        self.access_point_status.clone()
    }
}

impl NetworkSwitch for StaticDeviceStatus {
    fn status(&self) -> String {
        self.switch_status.clone()
    }
}

impl SecureComms for StaticDeviceStatus {
    fn is_connected(&self, peer: &str) -> bool {
        self.scc.peers.get(peer).is_some_and(|p| p.connected)
    }

    fn status(&self) -> SccStatus {
        self.scc.clone()
    }
}

impl FieldLights for StaticDeviceStatus {
    fn current_state(&self) -> String {
        self.lights.clone()
    }
}
