//! Infrastructure layer: concrete implementations of the domain's
//! registry and pusher interfaces, plus DTO conversions.

pub mod dto;
pub mod pusher;
pub mod registry;
