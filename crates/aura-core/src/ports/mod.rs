//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod generation;
mod rate_limit;
mod repository;

pub use auth::{AuthError, TokenClaims, TokenVerifier};
pub use generation::{
    GenerationError, GenerationOptions, GenerationRequest, ModelInfo, TextGenerator, TextStream,
};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{
    BaseRepository, CatalogRepository, ModerationRepository, StoryCommentRepository,
};
