//! Blog post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use super::{from_json, to_json};
use crate::database::postgres_repo::SluggedEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl SluggedEntity for Entity {
    fn slug_column() -> Column {
        Column::Slug
    }
}

impl From<Model> for aura_core::domain::BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            content: model.content,
            excerpt: model.excerpt,
            cover_image: model.cover_image,
            tags: from_json(model.tags),
            is_published: model.is_published,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<aura_core::domain::BlogPost> for ActiveModel {
    fn from(b: aura_core::domain::BlogPost) -> Self {
        Self {
            id: Set(b.id),
            title: Set(b.title),
            slug: Set(b.slug),
            content: Set(b.content),
            excerpt: Set(b.excerpt),
            cover_image: Set(b.cover_image),
            tags: Set(to_json(&b.tags)),
            is_published: Set(b.is_published),
            created_at: Set(b.created_at.into()),
            updated_at: Set(b.updated_at.into()),
        }
    }
}
