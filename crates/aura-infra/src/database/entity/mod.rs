//! SeaORM entities, one per table, with conversions to and from the domain.
//!
//! List-shaped and enrichment fields are stored as JSONB. Decoding them is
//! lossy: a malformed column reads back as the empty value.

pub mod affirmation;
pub mod blog_post;
pub mod glossary_term;
pub mod herb;
pub mod product;
pub mod story_comment;
pub mod testimonial;
pub mod user_story;

use sea_orm::entity::prelude::Json;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub(crate) fn to_json<T: Serialize>(value: &T) -> Json {
    serde_json::to_value(value).unwrap_or(Json::Null)
}

pub(crate) fn from_json<T: DeserializeOwned + Default>(value: Json) -> T {
    serde_json::from_value(value).unwrap_or_default()
}
