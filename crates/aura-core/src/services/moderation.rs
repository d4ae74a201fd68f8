use std::sync::Arc;

use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::domain::{Moderated, ModerationAction, ModerationOutcome, ModerationStatus};
use crate::error::{DomainError, RepoError};
use crate::ports::ModerationRepository;

/// Approval workflow over one kind of user-submitted record.
pub struct ModerationService<T: Moderated> {
    repo: Arc<dyn ModerationRepository<T>>,
}

impl<T: Moderated> Clone for ModerationService<T> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<T: Moderated> ModerationService<T> {
    pub fn new(repo: Arc<dyn ModerationRepository<T>>) -> Self {
        Self { repo }
    }

    /// Store a public submission. Whatever flags the caller set, the record
    /// is saved unapproved and unfeatured.
    pub async fn submit(&self, mut record: T) -> Result<T, DomainError> {
        record.set_approved(false);
        record.set_featured(false);
        record.validate()?;

        let saved = self.repo.save(record).await?;
        tracing::info!(entity = T::ENTITY, id = %saved.id(), "Submission stored for review");
        Ok(saved)
    }

    /// Admin listing.
    pub async fn list(&self, status: ModerationStatus) -> Result<Vec<T>, DomainError> {
        Ok(self.repo.list_by_status(status).await?)
    }

    /// Public listing - approved records only.
    pub async fn list_public(&self) -> Result<Vec<T>, DomainError> {
        self.list(ModerationStatus::Approved).await
    }

    /// An approved record; pending records are reported as not found.
    pub async fn get_public(&self, id: Uuid) -> Result<T, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(|r| r.is_approved())
            .ok_or_else(|| DomainError::not_found(T::ENTITY, id))
    }

    /// Random subset of approved, featured records for homepage rotation.
    pub async fn featured_sample(&self, limit: usize) -> Result<Vec<T>, DomainError> {
        let featured = self.repo.list_featured().await?;
        let mut rng = rand::thread_rng();
        Ok(featured
            .choose_multiple(&mut rng, limit)
            .cloned()
            .collect())
    }

    /// Apply an admin action to a single record.
    pub async fn moderate(
        &self,
        id: Uuid,
        action: ModerationAction,
    ) -> Result<ModerationOutcome<T>, DomainError> {
        let mut record = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(T::ENTITY, id))?;

        if !action.apply(&mut record)? {
            self.repo.delete(id).await.map_err(|e| match e {
                RepoError::NotFound => DomainError::not_found(T::ENTITY, id),
                other => other.into(),
            })?;
            tracing::info!(entity = T::ENTITY, %id, "Record denied and deleted");
            return Ok(ModerationOutcome::Deleted(id));
        }

        let saved = self.repo.save(record).await?;
        tracing::info!(
            entity = T::ENTITY,
            %id,
            action = action.name(),
            approved = saved.is_approved(),
            featured = ?saved.featured(),
            "Moderation action applied"
        );
        Ok(ModerationOutcome::Updated(saved))
    }
}
