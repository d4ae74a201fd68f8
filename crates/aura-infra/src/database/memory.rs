//! In-memory repositories - used when no `DATABASE_URL` is configured.
//!
//! Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use aura_core::domain::{
    Affirmation, BlogPost, Catalogued, GlossaryTerm, Herb, Moderated, ModerationStatus, Product,
    StoryComment, Testimonial, UserStory,
};
use aura_core::error::RepoError;
use aura_core::ports::{
    BaseRepository, CatalogRepository, ModerationRepository, StoryCommentRepository,
};

/// A storable record.
pub trait Record: Clone + Send + Sync + 'static {
    fn record_id(&self) -> Uuid;

    /// Value that must be unique across records, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

macro_rules! moderated_records {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn record_id(&self) -> Uuid {
                Moderated::id(self)
            }
        })*
    };
}

macro_rules! catalogued_records {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn record_id(&self) -> Uuid {
                Catalogued::id(self)
            }

            fn unique_key(&self) -> Option<&str> {
                Some(Catalogued::slug(self))
            }
        })*
    };
}

moderated_records!(Testimonial, UserStory, StoryComment);
catalogued_records!(Herb, GlossaryTerm, Product, Affirmation, BlogPost);

/// HashMap-backed repository behind an async RwLock.
pub struct InMemoryRepository<T> {
    store: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;
        let id = entity.record_id();

        if let Some(key) = entity.unique_key() {
            let taken = store
                .values()
                .any(|other| other.record_id() != id && other.unique_key() == Some(key));
            if taken {
                return Err(RepoError::Constraint(format!("'{key}' already exists")));
            }
        }

        store.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl<T: Moderated + Record> ModerationRepository<T> for InMemoryRepository<T> {
    async fn list_by_status(&self, status: ModerationStatus) -> Result<Vec<T>, RepoError> {
        let store = self.store.read().await;
        let mut records: Vec<T> = store
            .values()
            .filter(|r| status.matches(r.is_approved()))
            .cloned()
            .collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        Ok(records)
    }

    async fn list_featured(&self) -> Result<Vec<T>, RepoError> {
        let store = self.store.read().await;
        let mut records: Vec<T> = store
            .values()
            .filter(|r| r.is_approved() && r.featured() == Some(true))
            .cloned()
            .collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        Ok(records)
    }
}

#[async_trait]
impl StoryCommentRepository for InMemoryRepository<StoryComment> {
    async fn list_approved_for_story(
        &self,
        story_id: Uuid,
    ) -> Result<Vec<StoryComment>, RepoError> {
        let store = self.store.read().await;
        let mut comments: Vec<StoryComment> = store
            .values()
            .filter(|c| c.story_id == story_id && c.approved)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }
}

#[async_trait]
impl<T: Catalogued + Record> CatalogRepository<T> for InMemoryRepository<T> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<T>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|r| r.slug() == slug).cloned())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().any(|r| r.slug() == slug))
    }

    async fn list_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.store.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_core::DomainError;
    use aura_core::domain::{
        BlogPostDraft, HerbDraft, ModerationAction, ModerationOutcome, NewStoryComment,
        NewTestimonial, NewUserStory, ProductDraft, ProductReview,
    };
    use aura_core::listing::ListQuery;
    use aura_core::services::{CatalogService, ModerationService, StoryCommentService};

    fn testimonials() -> ModerationService<Testimonial> {
        ModerationService::new(InMemoryRepository::<Testimonial>::shared())
    }

    fn new_testimonial(name: &str) -> Testimonial {
        Testimonial::new(NewTestimonial {
            client_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            rating: 5,
            testimonial_text: "Felt lighter after one session.".to_string(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_submission_hidden_until_approved() {
        let service = testimonials();
        let mut record = new_testimonial("Ana");
        record.approved = true;
        record.featured = true;

        let saved = service.submit(record).await.unwrap();
        assert!(!saved.approved);
        assert!(!saved.featured);
        assert!(service.list_public().await.unwrap().is_empty());
        assert!(matches!(
            service.get_public(saved.id).await,
            Err(DomainError::NotFound { .. })
        ));

        service
            .moderate(saved.id, ModerationAction::Approve { featured: false })
            .await
            .unwrap();
        assert_eq!(service.list_public().await.unwrap().len(), 1);
        assert!(service.get_public(saved.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_deny_removes_record() {
        let service = testimonials();
        let saved = service.submit(new_testimonial("Ben")).await.unwrap();

        let outcome = service
            .moderate(saved.id, ModerationAction::Deny)
            .await
            .unwrap();
        assert!(matches!(outcome, ModerationOutcome::Deleted(id) if id == saved.id));
        assert!(service.list(ModerationStatus::All).await.unwrap().is_empty());

        let again = service.moderate(saved.id, ModerationAction::Deny).await;
        assert!(matches!(again, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_toggle_featured_twice_restores() {
        let service = testimonials();
        let saved = service.submit(new_testimonial("Cleo")).await.unwrap();
        service
            .moderate(saved.id, ModerationAction::Approve { featured: false })
            .await
            .unwrap();

        service
            .moderate(saved.id, ModerationAction::ToggleFeatured)
            .await
            .unwrap();
        assert_eq!(service.featured_sample(10).await.unwrap().len(), 1);

        service
            .moderate(saved.id, ModerationAction::ToggleFeatured)
            .await
            .unwrap();
        assert!(service.featured_sample(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_featured_sample_respects_limit() {
        let service = testimonials();
        for name in ["A", "B", "C", "D"] {
            let saved = service.submit(new_testimonial(name)).await.unwrap();
            service
                .moderate(saved.id, ModerationAction::Approve { featured: true })
                .await
                .unwrap();
        }
        let pending = service.submit(new_testimonial("E")).await.unwrap();

        let sample = service.featured_sample(3).await.unwrap();
        assert_eq!(sample.len(), 3);
        assert!(sample.iter().all(|t| t.approved && t.featured));
        assert!(sample.iter().all(|t| t.id != pending.id));
    }

    #[tokio::test]
    async fn test_pending_listing_is_newest_first() {
        let service = testimonials();
        let first = service.submit(new_testimonial("Old")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = service.submit(new_testimonial("New")).await.unwrap();

        let pending = service.list(ModerationStatus::Pending).await.unwrap();
        assert_eq!(pending[0].id, second.id);
        assert_eq!(pending[1].id, first.id);
    }

    fn story_services() -> (ModerationService<UserStory>, StoryCommentService) {
        let stories = ModerationService::new(InMemoryRepository::<UserStory>::shared());
        let comments = InMemoryRepository::<StoryComment>::shared();
        let service = StoryCommentService::new(
            comments.clone(),
            ModerationService::new(comments),
            stories.clone(),
        );
        (stories, service)
    }

    fn new_story() -> UserStory {
        UserStory::new(NewUserStory {
            author_name: "Dee".to_string(),
            email: "dee@example.com".to_string(),
            title: "Ten years of migraines".to_string(),
            story: "What finally helped was rest.".to_string(),
            ..Default::default()
        })
    }

    fn new_comment() -> NewStoryComment {
        NewStoryComment {
            author_name: "Eli".to_string(),
            email: "eli@example.com".to_string(),
            text: "Thank you for sharing.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_comments_require_approved_story() {
        let (stories, comments) = story_services();
        let story = stories.submit(new_story()).await.unwrap();

        let rejected = comments.submit(story.id, new_comment()).await;
        assert!(matches!(rejected, Err(DomainError::NotFound { .. })));

        stories
            .moderate(story.id, ModerationAction::Approve { featured: false })
            .await
            .unwrap();
        let comment = comments.submit(story.id, new_comment()).await.unwrap();
        assert!(!comment.approved);
        assert!(comments.list_public_for_story(story.id).await.unwrap().is_empty());

        comments
            .moderation()
            .moderate(comment.id, ModerationAction::Approve { featured: false })
            .await
            .unwrap();
        let visible = comments.list_public_for_story(story.id).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].text, "Thank you for sharing.");
    }

    #[tokio::test]
    async fn test_comments_cannot_be_featured() {
        let (stories, comments) = story_services();
        let story = stories.submit(new_story()).await.unwrap();
        stories
            .moderate(story.id, ModerationAction::Approve { featured: false })
            .await
            .unwrap();
        let comment = comments.submit(story.id, new_comment()).await.unwrap();
        comments
            .moderation()
            .moderate(comment.id, ModerationAction::Approve { featured: false })
            .await
            .unwrap();

        let toggled = comments
            .moderation()
            .moderate(comment.id, ModerationAction::ToggleFeatured)
            .await;
        assert!(matches!(toggled, Err(DomainError::Validation(_))));
    }

    fn herb_draft(name: &str) -> HerbDraft {
        HerbDraft {
            name: name.to_string(),
            description: "A fragrant herb.".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_duplicate_names_get_distinct_slugs() {
        let herbs = CatalogService::new(InMemoryRepository::<Herb>::shared());

        let first = herbs.create(herb_draft("Holy Basil")).await.unwrap();
        let second = herbs.create(herb_draft("Holy Basil")).await.unwrap();
        let third = herbs.create(herb_draft("holy basil!")).await.unwrap();

        assert_eq!(first.slug, "holy-basil");
        assert_eq!(second.slug, "holy-basil-2");
        assert_eq!(third.slug, "holy-basil-3");
        assert_eq!(herbs.get_by_slug("holy-basil-2", false).await.unwrap().id, second.id);
    }

    #[tokio::test]
    async fn test_update_keeps_slug() {
        let herbs = CatalogService::new(InMemoryRepository::<Herb>::shared());
        let created = herbs.create(herb_draft("Tulsi")).await.unwrap();

        let updated = herbs
            .update(created.id, herb_draft("Tulsi (Holy Basil)"))
            .await
            .unwrap();
        assert_eq!(updated.slug, "tulsi");
        assert_eq!(updated.name, "Tulsi (Holy Basil)");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_listing_filters_and_paginates() {
        let herbs = CatalogService::new(InMemoryRepository::<Herb>::shared());
        for i in 0..14 {
            herbs.create(herb_draft(&format!("Basil {i:02}"))).await.unwrap();
        }
        herbs.create(herb_draft("Chamomile")).await.unwrap();

        let all = herbs.list(&ListQuery::default(), false).await.unwrap();
        assert_eq!(all.page.total_items, 15);
        assert_eq!(all.page.total_pages, 2);
        assert_eq!(all.page.items.len(), 12);
        assert_eq!(all.letters, vec!['B', 'C']);

        let c = ListQuery {
            letter: Some('c'),
            ..Default::default()
        };
        let listing = herbs.list(&c, false).await.unwrap();
        assert_eq!(listing.page.total_items, 1);
        assert_eq!(listing.page.items[0].name, "Chamomile");
    }

    #[tokio::test]
    async fn test_drafts_hidden_from_public() {
        let posts = CatalogService::new(InMemoryRepository::<BlogPost>::shared());
        let draft = posts
            .create(BlogPostDraft {
                title: "Moon rituals".to_string(),
                content: "Draft".to_string(),
                is_published: false,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(posts.get_by_slug(&draft.slug, false).await.is_err());
        assert!(posts.get_by_slug(&draft.slug, true).await.is_ok());
        assert_eq!(posts.list(&ListQuery::default(), false).await.unwrap().page.total_items, 0);
        assert_eq!(posts.list(&ListQuery::default(), true).await.unwrap().page.total_items, 1);
    }

    #[tokio::test]
    async fn test_product_review_appended() {
        let products = CatalogService::new(InMemoryRepository::<Product>::shared());
        let product = products
            .create(ProductDraft {
                name: "Rose Quartz".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let review = ProductReview::new("Fay".into(), 4, "Pretty stone".into()).unwrap();
        let updated = products.add_review(&product.slug, review).await.unwrap();
        assert_eq!(updated.reviews.len(), 1);
        assert_eq!(updated.average_rating(), Some(4.0));
    }

    #[tokio::test]
    async fn test_admin_update_keeps_reviews() {
        let products = CatalogService::new(InMemoryRepository::<Product>::shared());
        let product = products
            .create(ProductDraft {
                name: "Rose Quartz".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let review = ProductReview::new("Fay".into(), 4, "Pretty stone".into()).unwrap();
        products.add_review(&product.slug, review).await.unwrap();

        let updated = products
            .update(
                product.id,
                ProductDraft {
                    name: "Rose Quartz".to_string(),
                    description: "Stone of gentle love".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, "Stone of gentle love");
        assert_eq!(updated.reviews.len(), 1);
        assert_eq!(updated.reviews[0].author, "Fay");
        assert_eq!(updated.slug, product.slug);
    }

    #[tokio::test]
    async fn test_concurrent_reviews_are_all_kept() {
        let products = CatalogService::new(InMemoryRepository::<Product>::shared());
        let product = products
            .create(ProductDraft {
                name: "Tingsha".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let first = ProductReview::new("Ana".into(), 5, "Clear tone".into()).unwrap();
        let second = ProductReview::new("Ben".into(), 3, "A bit small".into()).unwrap();
        let (a, b) = futures::join!(
            products.add_review(&product.slug, first),
            products.add_review(&product.slug, second),
        );
        a.unwrap();
        b.unwrap();

        let stored = products.get(product.id).await.unwrap();
        assert_eq!(stored.reviews.len(), 2);
        assert_eq!(stored.average_rating(), Some(4.0));
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let herbs = CatalogService::new(InMemoryRepository::<Herb>::shared());
        assert!(matches!(
            herbs.delete(Uuid::new_v4()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
