//! Product entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use aura_core::domain::PricingModel;

use super::{from_json, to_json};
use crate::database::postgres_repo::SluggedEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub pricing: String,
    pub affiliate_link: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub pros: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub cons: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub features: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub reviews: Json,
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

impl From<Model> for aura_core::domain::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            category: model.category,
            description: model.description,
            tags: from_json(model.tags),
            pricing: PricingModel::parse_lossy(&model.pricing),
            affiliate_link: model.affiliate_link,
            pros: from_json(model.pros),
            cons: from_json(model.cons),
            features: from_json(model.features),
            reviews: from_json(model.reviews),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<aura_core::domain::Product> for ActiveModel {
    fn from(p: aura_core::domain::Product) -> Self {
        Self {
            id: Set(p.id),
            name: Set(p.name),
            slug: Set(p.slug),
            category: Set(p.category),
            description: Set(p.description),
            tags: Set(to_json(&p.tags)),
            pricing: Set(p.pricing.as_str().to_string()),
            affiliate_link: Set(p.affiliate_link),
            pros: Set(to_json(&p.pros)),
            cons: Set(to_json(&p.cons)),
            features: Set(to_json(&p.features)),
            reviews: Set(to_json(&p.reviews)),
            created_at: Set(p.created_at.into()),
            updated_at: Set(p.updated_at.into()),
        }
    }
}
