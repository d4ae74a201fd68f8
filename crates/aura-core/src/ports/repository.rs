use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Catalogued, Moderated, ModerationStatus, StoryComment};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Storage for user-submitted, moderated records.
#[async_trait]
pub trait ModerationRepository<T: Moderated>: BaseRepository<T, Uuid> {
    /// Records matching the status filter, newest first.
    async fn list_by_status(&self, status: ModerationStatus) -> Result<Vec<T>, RepoError>;

    /// Approved and featured records.
    async fn list_featured(&self) -> Result<Vec<T>, RepoError>;
}

/// Comments are additionally looked up per story.
#[async_trait]
pub trait StoryCommentRepository: ModerationRepository<StoryComment> {
    /// Approved comments on a story, oldest first.
    async fn list_approved_for_story(&self, story_id: Uuid)
    -> Result<Vec<StoryComment>, RepoError>;
}

/// Storage for slug-addressed, admin-authored records.
#[async_trait]
pub trait CatalogRepository<T: Catalogued>: BaseRepository<T, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<T>, RepoError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError>;

    /// Every record, in no particular order.
    async fn list_all(&self) -> Result<Vec<T>, RepoError>;
}
