use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{Catalogued, RecordMeta, clean_list};
use super::non_blank;
use crate::error::DomainError;

/// Link from herbs/glossary terms to a marketplace product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecommendation {
    pub product_id: Uuid,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    Free,
    Freemium,
    #[default]
    Paid,
    Subscription,
    OneTime,
}

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModel::Free => "free",
            PricingModel::Freemium => "freemium",
            PricingModel::Paid => "paid",
            PricingModel::Subscription => "subscription",
            PricingModel::OneTime => "one-time",
        }
    }

    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "free" => PricingModel::Free,
            "freemium" => PricingModel::Freemium,
            "subscription" => PricingModel::Subscription,
            "one-time" => PricingModel::OneTime,
            _ => PricingModel::Paid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReview {
    pub author: String,
    pub rating: u8,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ProductReview {
    pub fn new(author: String, rating: u8, text: String) -> Result<Self, DomainError> {
        let author = author.trim().to_string();
        let text = text.trim().to_string();
        if author.is_empty() || text.is_empty() {
            return Err(DomainError::Validation(
                "Review author and text are required".to_string(),
            ));
        }
        if !(1..=5).contains(&rating) {
            return Err(DomainError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        Ok(Self {
            author,
            rating,
            text,
            created_at: Utc::now(),
        })
    }
}

/// Marketplace / tools directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub description: String,
    pub tags: Vec<String>,
    pub pricing: PricingModel,
    pub affiliate_link: Option<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub features: Vec<String>,
    pub reviews: Vec<ProductReview>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Average review rating, `None` without reviews.
    pub fn average_rating(&self) -> Option<f32> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(sum as f32 / self.reviews.len() as f32)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub tags: Vec<String>,
    pub pricing: PricingModel,
    pub affiliate_link: Option<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub features: Vec<String>,
}

impl Catalogued for Product {
    type Draft = ProductDraft;

    const ENTITY: &'static str = "Product";

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
            self.tags.join(" "),
            self.description
        )
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn slug_source(draft: &ProductDraft) -> &str {
        &draft.name
    }

    fn validate_draft(draft: &ProductDraft) -> Result<(), DomainError> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Product name is required".to_string(),
            ));
        }
        let link = draft.affiliate_link.as_deref().map(str::trim).unwrap_or("");
        if !link.is_empty() && !(link.starts_with("https://") || link.starts_with("http://")) {
            return Err(DomainError::Validation(
                "Affiliate link must be an http(s) URL".to_string(),
            ));
        }
        Ok(())
    }

    fn from_draft(draft: ProductDraft, meta: RecordMeta) -> Self {
        Self {
            id: meta.id,
            name: draft.name.trim().to_string(),
            slug: meta.slug,
            category: draft.category.trim().to_string(),
            description: draft.description.trim().to_string(),
            tags: clean_list(draft.tags),
            pricing: draft.pricing,
            affiliate_link: non_blank(draft.affiliate_link),
            pros: clean_list(draft.pros),
            cons: clean_list(draft.cons),
            features: clean_list(draft.features),
            reviews: Vec::new(),
            created_at: meta.created_at,
            updated_at: meta.updated_at,
        }
    }

    /// Reviews only arrive through visitor submissions.
    fn retain_from(&mut self, existing: Self) {
        self.reviews = existing.reviews;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_rating_validated() {
        assert!(ProductReview::new("Ana".into(), 0, "meh".into()).is_err());
        assert!(ProductReview::new("".into(), 4, "good".into()).is_err());
        assert!(ProductReview::new("Ana".into(), 4, "Lovely oil".into()).is_ok());
    }

    #[test]
    fn test_average_rating() {
        let mut product = Product::from_draft(
            ProductDraft {
                name: "Singing Bowl".into(),
                ..Default::default()
            },
            RecordMeta::fresh("singing-bowl".into()),
        );
        assert_eq!(product.average_rating(), None);
        product.reviews.push(ProductReview::new("A".into(), 5, "Great".into()).unwrap());
        product.reviews.push(ProductReview::new("B".into(), 4, "Good".into()).unwrap());
        assert_eq!(product.average_rating(), Some(4.5));
    }

    #[test]
    fn test_affiliate_link_must_be_url() {
        let draft = ProductDraft {
            name: "Crystal set".into(),
            affiliate_link: Some("javascript:alert(1)".into()),
            ..Default::default()
        };
        assert!(Product::validate_draft(&draft).is_err());
    }

    #[test]
    fn test_draft_ignores_reviews() {
        let draft: ProductDraft = serde_json::from_value(serde_json::json!({
            "name": "Sage bundle",
            "reviews": [{"author": "X", "rating": 200, "text": "!", "createdAt": "2026-01-01T00:00:00Z"}],
        }))
        .unwrap();
        let product = Product::from_draft(draft, RecordMeta::fresh("sage-bundle".into()));
        assert!(product.reviews.is_empty());
        assert_eq!(product.average_rating(), None);
    }
}
