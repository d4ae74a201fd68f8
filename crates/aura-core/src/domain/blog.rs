use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{Catalogued, ListOrder, RecordMeta, clean_list};
use super::non_blank;
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    /// Rendered HTML from the editor.
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
}

impl Catalogued for BlogPost {
    type Draft = BlogPostDraft;

    const ENTITY: &'static str = "BlogPost";
    const ORDER: ListOrder = ListOrder::Newest;

    fn id(&self) -> Uuid {
        self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn sort_key(&self) -> &str {
        &self.title
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.excerpt.as_deref().unwrap_or_default(),
            self.tags.join(" ")
        )
    }

    fn is_public(&self) -> bool {
        self.is_published
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn slug_source(draft: &BlogPostDraft) -> &str {
        &draft.title
    }

    fn validate_draft(draft: &BlogPostDraft) -> Result<(), DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::Validation("Post title is required".to_string()));
        }
        if draft.is_published && draft.content.trim().is_empty() {
            return Err(DomainError::Validation(
                "Cannot publish a post without content".to_string(),
            ));
        }
        Ok(())
    }

    fn from_draft(draft: BlogPostDraft, meta: RecordMeta) -> Self {
        Self {
            id: meta.id,
            title: draft.title.trim().to_string(),
            slug: meta.slug,
            content: draft.content,
            excerpt: non_blank(draft.excerpt),
            cover_image: non_blank(draft.cover_image),
            tags: clean_list(draft.tags),
            is_published: draft.is_published,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        }
    }
}
