use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{Catalogued, RecordMeta, clean_list};
use super::non_blank;
use super::product::ProductRecommendation;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HerbCategory {
    Spices,
    Herbs,
    Mushrooms,
    Chiles,
    Superfood,
    Blend,
    Extracts,
    Tea,
    #[default]
    Other,
}

impl HerbCategory {
    pub const ALL: [HerbCategory; 9] = [
        HerbCategory::Spices,
        HerbCategory::Herbs,
        HerbCategory::Mushrooms,
        HerbCategory::Chiles,
        HerbCategory::Superfood,
        HerbCategory::Blend,
        HerbCategory::Extracts,
        HerbCategory::Tea,
        HerbCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HerbCategory::Spices => "Spices",
            HerbCategory::Herbs => "Herbs",
            HerbCategory::Mushrooms => "Mushrooms",
            HerbCategory::Chiles => "Chiles",
            HerbCategory::Superfood => "Superfood",
            HerbCategory::Blend => "Blend",
            HerbCategory::Extracts => "Extracts",
            HerbCategory::Tea => "Tea",
            HerbCategory::Other => "Other",
        }
    }

    /// Unknown names map to `Other`.
    pub fn parse_lossy(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for HerbCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Herb/ingredient encyclopedia entry. Admin-authored only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Herb {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: HerbCategory,
    pub healing_properties: Vec<String>,
    pub description: String,
    pub physical: Option<String>,
    pub emotional: Option<String>,
    pub benefits: Option<String>,
    pub usage: Option<String>,
    pub products: Vec<ProductRecommendation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HerbDraft {
    pub name: String,
    pub category: HerbCategory,
    pub healing_properties: Vec<String>,
    pub description: String,
    pub physical: Option<String>,
    pub emotional: Option<String>,
    pub benefits: Option<String>,
    pub usage: Option<String>,
    pub products: Vec<ProductRecommendation>,
}

impl Catalogued for Herb {
    type Draft = HerbDraft;

    const ENTITY: &'static str = "Herb";

    fn id(&self) -> Uuid {
        self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn sort_key(&self) -> &str {
        &self.name
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.category,
            self.healing_properties.join(" "),
            self.description
        )
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn slug_source(draft: &HerbDraft) -> &str {
        &draft.name
    }

    fn validate_draft(draft: &HerbDraft) -> Result<(), DomainError> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::Validation("Herb name is required".to_string()));
        }
        Ok(())
    }

    fn from_draft(draft: HerbDraft, meta: RecordMeta) -> Self {
        Self {
            id: meta.id,
            name: draft.name.trim().to_string(),
            slug: meta.slug,
            category: draft.category,
            healing_properties: clean_list(draft.healing_properties),
            description: draft.description.trim().to_string(),
            physical: non_blank(draft.physical),
            emotional: non_blank(draft.emotional),
            benefits: non_blank(draft.benefits),
            usage: non_blank(draft.usage),
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
    fn test_category_serialization() {
        let json = serde_json::to_string(&HerbCategory::Mushrooms).unwrap();
        assert_eq!(json, "\"Mushrooms\"");
        assert_eq!(HerbCategory::parse_lossy("tea"), HerbCategory::Tea);
        assert_eq!(HerbCategory::parse_lossy("Roots"), HerbCategory::Other);
    }

    #[test]
    fn test_from_draft_cleans_lists() {
        let herb = Herb::from_draft(
            HerbDraft {
                name: " Turmeric ".to_string(),
                category: HerbCategory::Spices,
                healing_properties: vec!["anti-inflammatory".to_string(), " ".to_string()],
                usage: Some(String::new()),
                ..Default::default()
            },
            RecordMeta::fresh("turmeric".to_string()),
        );
        assert_eq!(herb.name, "Turmeric");
        assert_eq!(herb.healing_properties, vec!["anti-inflammatory"]);
        assert_eq!(herb.usage, None);
    }
}
