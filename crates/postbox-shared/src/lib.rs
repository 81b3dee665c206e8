//! # Postbox Shared
//!
//! Wire types shared between the HTTP adapter and its clients.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, MessageResponse};
