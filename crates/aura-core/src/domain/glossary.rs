use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{Catalogued, RecordMeta};
use super::non_blank;
use super::product::ProductRecommendation;
use crate::error::DomainError;

/// Encyclopedia term. Core fields are required, everything in
/// [`GlossaryEnrichment`] is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub id: Uuid,
    pub term: String,
    pub slug: String,
    pub category: String,
    pub sub_category: Option<String>,
    pub short_definition: String,
    /// Markdown.
    pub long_definition: String,
    #[serde(flatten)]
    pub enrichment: GlossaryEnrichment,
    pub recommended_products: Vec<ProductRecommendation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlossaryEnrichment {
    pub origin: Option<String>,
    pub traditional_usage: Option<String>,
    pub modern_usage: Option<String>,
    pub energy_type: Option<String>,
    pub chakras: Vec<String>,
    pub elements: Vec<String>,
    pub beginner_explanation: Option<String>,
    pub advanced_explanation: Option<String>,
    pub affirmations: Vec<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub keywords: Vec<String>,
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlossaryTermDraft {
    pub term: String,
    pub category: String,
    pub sub_category: Option<String>,
    pub short_definition: String,
    pub long_definition: String,
    #[serde(flatten)]
    pub enrichment: GlossaryEnrichment,
    pub recommended_products: Vec<ProductRecommendation>,
}

impl Catalogued for GlossaryTerm {
    type Draft = GlossaryTermDraft;

    const ENTITY: &'static str = "GlossaryTerm";

    fn id(&self) -> Uuid {
        self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn sort_key(&self) -> &str {
        &self.term
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.term,
            self.category,
            self.short_definition,
            self.enrichment.synonyms.join(" "),
            self.enrichment.keywords.join(" ")
        )
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn slug_source(draft: &GlossaryTermDraft) -> &str {
        &draft.term
    }

    fn validate_draft(draft: &GlossaryTermDraft) -> Result<(), DomainError> {
        if draft.term.trim().is_empty() || draft.short_definition.trim().is_empty() {
            return Err(DomainError::Validation(
                "Term and short definition are required".to_string(),
            ));
        }
        Ok(())
    }

    fn from_draft(draft: GlossaryTermDraft, meta: RecordMeta) -> Self {
        Self {
            id: meta.id,
            term: draft.term.trim().to_string(),
            slug: meta.slug,
            category: draft.category.trim().to_string(),
            sub_category: non_blank(draft.sub_category),
            short_definition: draft.short_definition.trim().to_string(),
            long_definition: draft.long_definition,
            enrichment: draft.enrichment,
            recommended_products: draft.recommended_products,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        }
    }
}
