//! Validation and orchestration on top of the repository traits.

pub mod client;
pub mod notification;
