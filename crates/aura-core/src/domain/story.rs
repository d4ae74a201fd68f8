use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::moderation::Moderated;
use super::non_blank;
use crate::error::DomainError;

/// Long-form user story, moderated like testimonials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    pub id: Uuid,
    pub author_name: String,
    pub email: String,
    pub title: String,
    pub story: String,
    pub pain_type: Option<String>,
    pub duration: Option<String>,
    pub what_helped: Option<String>,
    pub what_didnt_help: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub age: Option<u16>,
    pub approved: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserStory {
    pub author_name: String,
    pub email: String,
    pub title: String,
    pub story: String,
    #[serde(default)]
    pub pain_type: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub what_helped: Option<String>,
    #[serde(default)]
    pub what_didnt_help: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub age: Option<u16>,
}

impl UserStory {
    pub fn new(input: NewUserStory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_name: input.author_name.trim().to_string(),
            email: input.email.trim().to_string(),
            title: input.title.trim().to_string(),
            story: input.story.trim().to_string(),
            pain_type: non_blank(input.pain_type),
            duration: non_blank(input.duration),
            what_helped: non_blank(input.what_helped),
            what_didnt_help: non_blank(input.what_didnt_help),
            status: non_blank(input.status),
            category: non_blank(input.category),
            location: non_blank(input.location),
            age: input.age,
            approved: false,
            featured: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Moderated for UserStory {
    const ENTITY: &'static str = "UserStory";

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
        if self.author_name.is_empty() {
            return Err(DomainError::Validation("Name is required".to_string()));
        }
        if !self.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }
        if self.title.is_empty() || self.story.is_empty() {
            return Err(DomainError::Validation(
                "Title and story are required".to_string(),
            ));
        }
        if self.age.is_some_and(|age| age > 130) {
            return Err(DomainError::Validation("Invalid age".to_string()));
        }
        Ok(())
    }
}

/// Reader comment on a user story. Comments have no featured flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryComment {
    pub id: Uuid,
    pub story_id: Uuid,
    pub author_name: String,
    pub email: String,
    pub text: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStoryComment {
    pub author_name: String,
    pub email: String,
    pub text: String,
}

impl StoryComment {
    pub fn new(story_id: Uuid, input: NewStoryComment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            story_id,
            author_name: input.author_name.trim().to_string(),
            email: input.email.trim().to_string(),
            text: input.text.trim().to_string(),
            approved: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Moderated for StoryComment {
    const ENTITY: &'static str = "StoryComment";

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_approved(&self) -> bool {
        self.approved
    }

    fn set_approved(&mut self, approved: bool) {
        self.approved = approved;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.author_name.is_empty() || self.text.is_empty() {
            return Err(DomainError::Validation(
                "Name and comment text are required".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }
        Ok(())
    }
}
