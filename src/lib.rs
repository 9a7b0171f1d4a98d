//! # arena-gateway
//!
//! Snapshot-broadcast gateway for a live robotics-competition field.
//!
//! A single in-process aggregate (the arena) is exposed to any number of
//! display clients as a fixed catalog of named channels. Each channel
//! renders its own snapshot of the aggregate; a client joining late gets
//! the current snapshot immediately and every later change after that.
//!
//! ## Architecture
//!
//! ```text
//! Display clients (WebSocket)     Operators (HTTP)
//!     │                               │
//!     ├── WS Handler (ws/)            ├── REST Handlers (api/)
//!     │                               │
//!     └──────────── Arena (arena/) ───┘
//!                     │
//!                     ├── ArenaChannels ── Channel<S, P> (domain/)
//!                     ├── snapshot generators
//!                     ├── RosterService (service/)
//!                     │
//!                     └── SQLite persistence (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod arena;
pub mod config;
pub mod domain;
pub mod error;
pub mod game;
pub mod persistence;
pub mod service;
pub mod ws;
