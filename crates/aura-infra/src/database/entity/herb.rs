//! Herb entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use aura_core::domain::HerbCategory;

use super::{from_json, to_json};
use crate::database::postgres_repo::SluggedEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "herbs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub category: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub healing_properties: Json,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub physical: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub emotional: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub benefits: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub usage: Option<String>,
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

impl From<Model> for aura_core::domain::Herb {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            category: HerbCategory::parse_lossy(&model.category),
            healing_properties: from_json(model.healing_properties),
            description: model.description,
            physical: model.physical,
            emotional: model.emotional,
            benefits: model.benefits,
            usage: model.usage,
            products: from_json(model.products),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<aura_core::domain::Herb> for ActiveModel {
    fn from(h: aura_core::domain::Herb) -> Self {
        Self {
            id: Set(h.id),
            name: Set(h.name),
            slug: Set(h.slug),
            category: Set(h.category.as_str().to_string()),
            healing_properties: Set(to_json(&h.healing_properties)),
            description: Set(h.description),
            physical: Set(h.physical),
            emotional: Set(h.emotional),
            benefits: Set(h.benefits),
            usage: Set(h.usage),
            products: Set(to_json(&h.products)),
            created_at: Set(h.created_at.into()),
            updated_at: Set(h.updated_at.into()),
        }
    }
}
