use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{Catalogued, RecordMeta, clean_list};
use super::non_blank;
use crate::error::DomainError;

/// The eight healing themes affirmations are grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AffirmationCategory {
    SelfLove,
    Abundance,
    #[default]
    Healing,
    Protection,
    Grounding,
    Release,
    Confidence,
    Peace,
}

impl AffirmationCategory {
    pub const ALL: [AffirmationCategory; 8] = [
        AffirmationCategory::SelfLove,
        AffirmationCategory::Abundance,
        AffirmationCategory::Healing,
        AffirmationCategory::Protection,
        AffirmationCategory::Grounding,
        AffirmationCategory::Release,
        AffirmationCategory::Confidence,
        AffirmationCategory::Peace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AffirmationCategory::SelfLove => "self-love",
            AffirmationCategory::Abundance => "abundance",
            AffirmationCategory::Healing => "healing",
            AffirmationCategory::Protection => "protection",
            AffirmationCategory::Grounding => "grounding",
            AffirmationCategory::Release => "release",
            AffirmationCategory::Confidence => "confidence",
            AffirmationCategory::Peace => "peace",
        }
    }

    pub fn parse_lossy(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .unwrap_or_default()
    }
}

impl fmt::Display for AffirmationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ritual suggested alongside an affirmation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RitualPairing {
    pub herb: Option<String>,
    pub rituals: Vec<String>,
    pub breathwork: Option<String>,
    pub moon_phase: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affirmation {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub text: String,
    pub intention: String,
    pub category: AffirmationCategory,
    pub when_to_use: Vec<String>,
    pub why_it_works: String,
    pub ritual: RitualPairing,
    /// Glossary term slugs.
    pub glossary_terms: Vec<String>,
    pub products: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AffirmationDraft {
    pub title: String,
    pub text: String,
    pub intention: String,
    pub category: AffirmationCategory,
    pub when_to_use: Vec<String>,
    pub why_it_works: String,
    pub ritual: RitualPairing,
    pub glossary_terms: Vec<String>,
    pub products: Vec<Uuid>,
}

impl Catalogued for Affirmation {
    type Draft = AffirmationDraft;

    const ENTITY: &'static str = "Affirmation";

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
            "{} {} {} {}",
            self.title,
            self.text,
            self.intention,
            self.when_to_use.join(" ")
        )
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn slug_source(draft: &AffirmationDraft) -> &str {
        &draft.title
    }

    fn validate_draft(draft: &AffirmationDraft) -> Result<(), DomainError> {
        if draft.title.trim().is_empty() || draft.text.trim().is_empty() {
            return Err(DomainError::Validation(
                "Affirmation title and text are required".to_string(),
            ));
        }
        Ok(())
    }

    fn from_draft(draft: AffirmationDraft, meta: RecordMeta) -> Self {
        let ritual = RitualPairing {
            herb: non_blank(draft.ritual.herb),
            rituals: clean_list(draft.ritual.rituals),
            breathwork: non_blank(draft.ritual.breathwork),
            moon_phase: non_blank(draft.ritual.moon_phase),
        };
        Self {
            id: meta.id,
            title: draft.title.trim().to_string(),
            slug: meta.slug,
            text: draft.text.trim().to_string(),
            intention: draft.intention.trim().to_string(),
            category: draft.category,
            when_to_use: clean_list(draft.when_to_use),
            why_it_works: draft.why_it_works.trim().to_string(),
            ritual,
            glossary_terms: clean_list(draft.glossary_terms),
            products: draft.products,
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        for category in AffirmationCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            assert_eq!(AffirmationCategory::parse_lossy(category.as_str()), category);
        }
    }
}
