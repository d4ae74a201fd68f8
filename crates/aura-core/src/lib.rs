//! # Aura Core
//!
//! The domain layer of the Aura wellness site backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! content entities, the moderation and catalog workflows, listing/slug helpers,
//! and the prompt templates and decoders behind the AI activity widgets.

pub mod ai;
pub mod domain;
pub mod error;
pub mod listing;
pub mod ports;
pub mod services;
pub mod slug;

pub use error::DomainError;
