//! # Aura Infrastructure
//!
//! Concrete implementations of the ports defined in `aura-core`:
//! repositories, token verification, rate limiting and the language-model
//! client.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory repositories only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT verification of identity-provider tokens
//! - `rate-limit` - Per-client rate limiting via governor
//! - `ollama` - Ollama text generation over HTTP

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "ollama")]
pub mod generation;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use database::{InMemoryRepository, Record};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtVerifier};

#[cfg(feature = "ollama")]
pub use generation::{OllamaClient, OllamaConfig};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
