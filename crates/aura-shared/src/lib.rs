//! # Aura Shared
//!
//! Wire types shared between the API server and its clients (site frontend,
//! admin screens).

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
