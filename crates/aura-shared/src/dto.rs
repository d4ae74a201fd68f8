//! Data Transfer Objects - request/response types for the API.
//!
//! Public views deliberately omit submitter emails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query string for admin moderation listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

/// Body of an admin moderation PATCH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationRequest {
    pub id: Uuid,
    pub action: String,
    #[serde(default)]
    pub featured: Option<bool>,
}

/// Returned when a moderation action deleted the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: Uuid,
    pub deleted: bool,
}

/// Query string for featured rotations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

/// Acknowledgement of a public submission awaiting review.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: Uuid,
    pub approved: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTestimonial {
    pub id: Uuid,
    pub client_name: String,
    pub rating: u8,
    pub testimonial_text: String,
    pub issue: Option<String>,
    pub outcome: Option<String>,
    pub session_type: Option<String>,
    pub location: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserStory {
    pub id: Uuid,
    pub author_name: String,
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
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicComment {
    pub id: Uuid,
    pub story_id: Uuid,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// New product review from a visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub author: String,
    pub rating: u8,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffirmationsRequest {
    pub mood: String,
    #[serde(default)]
    pub challenge: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffirmationsResponse {
    pub affirmations: Vec<String>,
    pub fallback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChakraAnalysisRequest {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalAnalysisRequest {
    pub entry: String,
    #[serde(default)]
    pub mood: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSuggestionRequest {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub recent_topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSuggestionResponse {
    pub prompts: Vec<String>,
    pub fallback: bool,
}

/// Raw prompt passthrough for the admin playground.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTextRequest {
    pub prompt: String,
    #[serde(default)]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTextResponse {
    pub text: String,
}
