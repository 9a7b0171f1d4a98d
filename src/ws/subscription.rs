//! Per-connection subscription bookkeeping.
//!
//! Tracks which channels a WebSocket client has joined so command replies
//! can report the current set. Delivery itself is handled by the channels.

use std::collections::BTreeSet;

/// The set of channel names one connection is attached to.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    channels: BTreeSet<String>,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a channel. Returns `false` if it was already recorded.
    pub fn add(&mut self, channel: &str) -> bool {
        self.channels.insert(channel.to_string())
    }

    /// Forgets a channel. Returns `false` if it was not recorded.
    pub fn remove(&mut self, channel: &str) -> bool {
        self.channels.remove(channel)
    }

    /// Returns `true` if the connection is attached to `channel`.
    #[must_use]
    pub fn contains(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }

    /// Returns the number of attached channels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.channels.len()
    }

    /// Attached channel names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.channels.iter().cloned().collect()
    }
}
