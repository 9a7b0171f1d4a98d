//! Data Transfer Objects for REST request/response serialization.

pub mod alliance_dto;
pub mod common_dto;
pub mod display_dto;

pub use alliance_dto::*;
pub use common_dto::*;
pub use display_dto::*;
