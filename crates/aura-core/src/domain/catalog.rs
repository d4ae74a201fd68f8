//! Admin-authored content addressed by slug.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Identity fields the catalog service owns for every record.
#[derive(Debug, Clone)]
pub struct RecordMeta {
    pub id: Uuid,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    /// Metadata for a record created now.
    pub fn fresh(slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug,
            created_at: now,
            updated_at: now,
        }
    }
}

/// How a listing is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Case-insensitive by sort key.
    Alphabetical,
    /// Most recently created first.
    Newest,
}

/// Slug-addressed record with admin CRUD.
///
/// Admins send a `Draft` (every field except id, slug and timestamps); the
/// catalog service derives the slug and stamps the rest through
/// [`Catalogued::from_draft`].
pub trait Catalogued: Clone + Send + Sync + 'static {
    type Draft: Send + Sync;

    const ENTITY: &'static str;
    const ORDER: ListOrder = ListOrder::Alphabetical;

    fn id(&self) -> Uuid;

    fn slug(&self) -> &str;

    /// Key used for ordering and the alphabet filter.
    fn sort_key(&self) -> &str;

    /// Text matched by free-text search.
    fn search_text(&self) -> String;

    /// Whether anonymous visitors may see the record.
    fn is_public(&self) -> bool {
        true
    }

    fn created_at(&self) -> DateTime<Utc>;

    /// Human readable text the slug is derived from.
    fn slug_source(draft: &Self::Draft) -> &str;

    fn validate_draft(draft: &Self::Draft) -> Result<(), DomainError>;

    fn from_draft(draft: Self::Draft, meta: RecordMeta) -> Self;

    /// Carry fields that never come from a draft over from the stored
    /// record when an update replaces it.
    fn retain_from(&mut self, _existing: Self) {}
}

/// Trim every entry and drop the empty ones.
pub(crate) fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
