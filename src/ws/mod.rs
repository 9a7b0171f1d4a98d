//! WebSocket layer: connection handling, command routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` lets display clients attach to any
//! subset of the arena channels and change that subset at runtime.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
