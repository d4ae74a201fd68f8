use std::sync::Arc;

use chrono::Utc;
use futures::lock::Mutex;
use uuid::Uuid;

use crate::domain::{Catalogued, ListOrder, Product, ProductReview, RecordMeta};
use crate::error::{DomainError, RepoError};
use crate::listing::{ListQuery, Listing, PAGE_SIZE, available_letters, paginate};
use crate::ports::CatalogRepository;
use crate::slug::slugify;

/// Admin CRUD and public lookup for slug-addressed content.
pub struct CatalogService<T: Catalogued> {
    repo: Arc<dyn CatalogRepository<T>>,
    /// Serializes read-modify-write saves within this process.
    writes: Arc<Mutex<()>>,
}

impl<T: Catalogued> Clone for CatalogService<T> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            writes: self.writes.clone(),
        }
    }
}

fn conflict_or(e: RepoError) -> DomainError {
    match e {
        RepoError::Constraint(msg) => DomainError::Duplicate(msg),
        other => other.into(),
    }
}

impl<T: Catalogued> CatalogService<T> {
    pub fn new(repo: Arc<dyn CatalogRepository<T>>) -> Self {
        Self {
            repo,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Create a record with a slug derived from its name and made unique
    /// against the slugs already stored (`name`, `name-2`, `name-3`, ...).
    pub async fn create(&self, draft: T::Draft) -> Result<T, DomainError> {
        T::validate_draft(&draft)?;

        let slug = self.unique_slug(&slugify(T::slug_source(&draft))).await?;
        let record = T::from_draft(draft, RecordMeta::fresh(slug));
        let saved = self.repo.save(record).await.map_err(conflict_or)?;

        tracing::info!(entity = T::ENTITY, id = %saved.id(), slug = saved.slug(), "Created");
        Ok(saved)
    }

    /// Replace a record's content. Id, slug and creation time are kept so
    /// published URLs stay stable, along with anything
    /// [`Catalogued::retain_from`] carries over.
    pub async fn update(&self, id: Uuid, draft: T::Draft) -> Result<T, DomainError> {
        T::validate_draft(&draft)?;

        let _guard = self.writes.lock().await;
        let existing = self.get(id).await?;
        let meta = RecordMeta {
            id,
            slug: existing.slug().to_string(),
            created_at: existing.created_at(),
            updated_at: Utc::now(),
        };
        let mut record = T::from_draft(draft, meta);
        record.retain_from(existing);
        let saved = self.repo.save(record).await.map_err(conflict_or)?;

        tracing::info!(entity = T::ENTITY, %id, "Updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(T::ENTITY, id),
            other => other.into(),
        })?;
        tracing::info!(entity = T::ENTITY, %id, "Deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<T, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(T::ENTITY, id))
    }

    /// Look up by slug. Hidden records (drafts) are only returned when
    /// `include_hidden` is set.
    pub async fn get_by_slug(&self, slug: &str, include_hidden: bool) -> Result<T, DomainError> {
        self.repo
            .find_by_slug(slug)
            .await?
            .filter(|r| include_hidden || r.is_public())
            .ok_or_else(|| DomainError::not_found(T::ENTITY, slug))
    }

    /// Filtered, paginated directory listing.
    pub async fn list(
        &self,
        query: &ListQuery,
        include_hidden: bool,
    ) -> Result<Listing<T>, DomainError> {
        let mut records: Vec<T> = self
            .repo
            .list_all()
            .await?
            .into_iter()
            .filter(|r| include_hidden || r.is_public())
            .collect();

        match T::ORDER {
            ListOrder::Alphabetical => {
                records.sort_by_cached_key(|r| r.sort_key().to_lowercase())
            }
            ListOrder::Newest => records.sort_by_key(|r| std::cmp::Reverse(r.created_at())),
        }

        let letters = available_letters(records.iter().map(|r| r.sort_key()));
        let page = paginate(records, query, PAGE_SIZE, |r| r.sort_key(), |r| r.search_text());

        Ok(Listing { page, letters })
    }

    async fn unique_slug(&self, base: &str) -> Result<String, DomainError> {
        let mut candidate = base.to_string();
        let mut n = 1;
        while self.repo.slug_exists(&candidate).await? {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        Ok(candidate)
    }
}

impl CatalogService<Product> {
    /// Append a visitor review to a product.
    ///
    /// The whole product is re-saved, so appends are only serialized
    /// against other writes through this service instance. Several server
    /// processes sharing one database can still lose a concurrent review.
    pub async fn add_review(
        &self,
        slug: &str,
        review: ProductReview,
    ) -> Result<Product, DomainError> {
        let _guard = self.writes.lock().await;
        let mut product = self.get_by_slug(slug, false).await?;
        product.reviews.push(review);
        product.updated_at = Utc::now();
        Ok(self.repo.save(product).await?)
    }
}
