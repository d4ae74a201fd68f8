//! Glossary term entity for SeaORM. Enrichment fields live in one JSONB
//! column.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use super::{from_json, to_json};
use crate::database::postgres_repo::SluggedEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "glossary_terms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub term: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub category: String,
    pub sub_category: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub short_definition: String,
    #[sea_orm(column_type = "Text")]
    pub long_definition: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub enrichment: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub recommended_products: Json,
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

impl From<Model> for aura_core::domain::GlossaryTerm {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            term: model.term,
            slug: model.slug,
            category: model.category,
            sub_category: model.sub_category,
            short_definition: model.short_definition,
            long_definition: model.long_definition,
            enrichment: from_json(model.enrichment),
            recommended_products: from_json(model.recommended_products),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<aura_core::domain::GlossaryTerm> for ActiveModel {
    fn from(g: aura_core::domain::GlossaryTerm) -> Self {
        Self {
            id: Set(g.id),
            term: Set(g.term),
            slug: Set(g.slug),
            category: Set(g.category),
            sub_category: Set(g.sub_category),
            short_definition: Set(g.short_definition),
            long_definition: Set(g.long_definition),
            enrichment: Set(to_json(&g.enrichment)),
            recommended_products: Set(to_json(&g.recommended_products)),
            created_at: Set(g.created_at.into()),
            updated_at: Set(g.updated_at.into()),
        }
    }
}
