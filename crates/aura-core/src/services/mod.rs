//! Application services - the workflows handlers call into.

mod catalog;
mod comments;
mod moderation;

pub use catalog::CatalogService;
pub use comments::StoryCommentService;
pub use moderation::ModerationService;
