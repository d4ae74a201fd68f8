//! PostgreSQL repository implementations.
//!
//! Moderated and catalogued tables share one generic repository each; an
//! entity opts in by naming the columns the queries need.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    PrimaryKeyTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use aura_core::domain::{Catalogued, Moderated, ModerationStatus, StoryComment};
use aura_core::error::RepoError;
use aura_core::ports::{CatalogRepository, ModerationRepository, StoryCommentRepository};

use super::entity::{
    affirmation, blog_post, glossary_term, herb, product, story_comment, testimonial, user_story,
};
use super::postgres_base::{PostgresBaseRepository, query_err};

/// Columns used by the approval workflow queries.
pub trait ModeratedEntity: EntityTrait {
    fn approved_column() -> Self::Column;

    /// `None` for tables without a featured flag.
    fn featured_column() -> Option<Self::Column>;

    fn created_at_column() -> Self::Column;
}

/// Tables addressed by a unique slug.
pub trait SluggedEntity: EntityTrait {
    fn slug_column() -> Self::Column;
}

pub type PostgresTestimonialRepository = PostgresBaseRepository<testimonial::Entity>;
pub type PostgresUserStoryRepository = PostgresBaseRepository<user_story::Entity>;
pub type PostgresStoryCommentRepository = PostgresBaseRepository<story_comment::Entity>;
pub type PostgresHerbRepository = PostgresBaseRepository<herb::Entity>;
pub type PostgresGlossaryRepository = PostgresBaseRepository<glossary_term::Entity>;
pub type PostgresProductRepository = PostgresBaseRepository<product::Entity>;
pub type PostgresAffirmationRepository = PostgresBaseRepository<affirmation::Entity>;
pub type PostgresBlogRepository = PostgresBaseRepository<blog_post::Entity>;

#[async_trait]
impl<E, T> ModerationRepository<T> for PostgresBaseRepository<E>
where
    E: ModeratedEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    T: Moderated + From<E::Model> + Into<E::ActiveModel>,
{
    async fn list_by_status(&self, status: ModerationStatus) -> Result<Vec<T>, RepoError> {
        let mut query = E::find().order_by_desc(E::created_at_column());
        match status {
            ModerationStatus::Pending => query = query.filter(E::approved_column().eq(false)),
            ModerationStatus::Approved => query = query.filter(E::approved_column().eq(true)),
            ModerationStatus::All => {}
        }

        let rows = query.all(&self.db).await.map_err(query_err)?;
        tracing::debug!(entity = T::ENTITY, %status, count = rows.len(), "Listed records");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_featured(&self) -> Result<Vec<T>, RepoError> {
        let Some(featured) = E::featured_column() else {
            return Ok(Vec::new());
        };

        let rows = E::find()
            .filter(E::approved_column().eq(true))
            .filter(featured.eq(true))
            .order_by_desc(E::created_at_column())
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl StoryCommentRepository for PostgresStoryCommentRepository {
    async fn list_approved_for_story(
        &self,
        story_id: Uuid,
    ) -> Result<Vec<StoryComment>, RepoError> {
        let rows = story_comment::Entity::find()
            .filter(story_comment::Column::StoryId.eq(story_id))
            .filter(story_comment::Column::Approved.eq(true))
            .order_by_asc(story_comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl<E, T> CatalogRepository<T> for PostgresBaseRepository<E>
where
    E: SluggedEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    T: Catalogued + From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_slug(&self, slug: &str) -> Result<Option<T>, RepoError> {
        tracing::debug!(entity = T::ENTITY, slug, "Finding by slug");

        let row = E::find()
            .filter(E::slug_column().eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(row.map(Into::into))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let count = E::find()
            .filter(E::slug_column().eq(slug))
            .count(&self.db)
            .await
            .map_err(query_err)?;

        Ok(count > 0)
    }

    async fn list_all(&self) -> Result<Vec<T>, RepoError> {
        let rows = E::find().all(&self.db).await.map_err(query_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
