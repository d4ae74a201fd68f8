use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewStoryComment, StoryComment, UserStory};
use crate::error::DomainError;
use crate::ports::StoryCommentRepository;

use super::ModerationService;

/// Comments hang off approved stories and are moderated on their own.
#[derive(Clone)]
pub struct StoryCommentService {
    comments: Arc<dyn StoryCommentRepository>,
    moderation: ModerationService<StoryComment>,
    stories: ModerationService<UserStory>,
}

impl StoryCommentService {
    /// `comments` and `moderation` are expected to share one underlying
    /// repository.
    pub fn new(
        comments: Arc<dyn StoryCommentRepository>,
        moderation: ModerationService<StoryComment>,
        stories: ModerationService<UserStory>,
    ) -> Self {
        Self {
            comments,
            moderation,
            stories,
        }
    }

    /// Moderation workflow for comments (admin listing and actions).
    pub fn moderation(&self) -> &ModerationService<StoryComment> {
        &self.moderation
    }

    /// Submit a comment on an approved story.
    pub async fn submit(
        &self,
        story_id: Uuid,
        input: NewStoryComment,
    ) -> Result<StoryComment, DomainError> {
        self.stories.get_public(story_id).await?;
        self.moderation
            .submit(StoryComment::new(story_id, input))
            .await
    }

    /// Approved comments on an approved story.
    pub async fn list_public_for_story(
        &self,
        story_id: Uuid,
    ) -> Result<Vec<StoryComment>, DomainError> {
        self.stories.get_public(story_id).await?;
        Ok(self.comments.list_approved_for_story(story_id).await?)
    }
}
