//! Domain layer: the publish/subscribe primitives.
//!
//! This module contains the subscriber identity, the per-subscriber
//! delivery endpoint, and the generic [`Channel`] that turns a locked
//! source into a broadcast snapshot.

pub mod channel;
pub mod subscriber_id;

pub use channel::{Channel, Endpoint, Feed, Frame, Generator};
pub use subscriber_id::SubscriberId;
