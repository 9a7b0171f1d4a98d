//! Shared DTO types used across multiple endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Number of subscribers a broadcast reached.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct DeliveryResponse {
    /// Channel the payload went out on.
    pub channel: &'static str,
    /// Subscribers whose queue accepted the frame.
    pub delivered: usize,
}

/// One entry of the channel catalog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChannelInfo {
    /// Channel name.
    pub name: &'static str,
    /// Whether the channel produces snapshots on its own.
    pub has_generator: bool,
    /// Currently attached subscribers.
    pub subscriber_count: usize,
}
