use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::moderation::Moderated;
use super::non_blank;
use crate::error::DomainError;

/// Client testimonial submitted through the public form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub client_name: String,
    /// Private; never exposed by public listings.
    pub email: String,
    pub rating: u8,
    pub testimonial_text: String,
    pub issue: Option<String>,
    pub outcome: Option<String>,
    pub session_type: Option<String>,
    pub location: Option<String>,
    pub approved: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Publicly submitted testimonial fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    pub client_name: String,
    pub email: String,
    pub rating: u8,
    pub testimonial_text: String,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Testimonial {
    /// Create a pending testimonial.
    pub fn new(input: NewTestimonial) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_name: input.client_name.trim().to_string(),
            email: input.email.trim().to_string(),
            rating: input.rating,
            testimonial_text: input.testimonial_text.trim().to_string(),
            issue: non_blank(input.issue),
            outcome: non_blank(input.outcome),
            session_type: non_blank(input.session_type),
            location: non_blank(input.location),
            approved: false,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Moderated for Testimonial {
    const ENTITY: &'static str = "Testimonial";

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_approved(&self) -> bool {
        self.approved
    }

    fn set_approved(&mut self, approved: bool) {
        self.approved = approved;
    }

    fn featured(&self) -> Option<bool> {
        Some(self.featured)
    }

    fn set_featured(&mut self, featured: bool) {
        self.featured = featured;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.client_name.is_empty() {
            return Err(DomainError::Validation("Name is required".to_string()));
        }
        if !self.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(DomainError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        if self.testimonial_text.is_empty() {
            return Err(DomainError::Validation(
                "Testimonial text is required".to_string(),
            ));
        }
        Ok(())
    }
}
