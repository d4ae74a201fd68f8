//! Affirmation entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use aura_core::domain::AffirmationCategory;

use super::{from_json, to_json};
use crate::database::postgres_repo::SluggedEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "affirmations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    #[sea_orm(column_type = "Text")]
    pub intention: String,
    pub category: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub when_to_use: Json,
    #[sea_orm(column_type = "Text")]
    pub why_it_works: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub ritual: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub glossary_terms: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub products: Json,
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

impl From<Model> for aura_core::domain::Affirmation {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            text: model.text,
            intention: model.intention,
            category: AffirmationCategory::parse_lossy(&model.category),
            when_to_use: from_json(model.when_to_use),
            why_it_works: model.why_it_works,
            ritual: from_json(model.ritual),
            glossary_terms: from_json(model.glossary_terms),
            products: from_json(model.products),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<aura_core::domain::Affirmation> for ActiveModel {
    fn from(a: aura_core::domain::Affirmation) -> Self {
        Self {
            id: Set(a.id),
            title: Set(a.title),
            slug: Set(a.slug),
            text: Set(a.text),
            intention: Set(a.intention),
            category: Set(a.category.as_str().to_string()),
            when_to_use: Set(to_json(&a.when_to_use)),
            why_it_works: Set(a.why_it_works),
            ritual: Set(to_json(&a.ritual)),
            glossary_terms: Set(to_json(&a.glossary_terms)),
            products: Set(to_json(&a.products)),
            created_at: Set(a.created_at.into()),
            updated_at: Set(a.updated_at.into()),
        }
    }
}
