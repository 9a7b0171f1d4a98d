//! Service layer: queries exposed to collaborators.
//!
//! [`RosterService`] answers which members of a playoff alliance are
//! sitting out a given match.

pub mod roster_service;

pub use roster_service::RosterService;
