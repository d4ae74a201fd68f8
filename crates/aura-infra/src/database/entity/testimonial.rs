//! Testimonial entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::database::postgres_repo::ModeratedEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "testimonials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_name: String,
    pub email: String,
    pub rating: i16,
    #[sea_orm(column_type = "Text")]
    pub testimonial_text: String,
    pub issue: Option<String>,
    pub outcome: Option<String>,
    pub session_type: Option<String>,
    pub location: Option<String>,
    pub approved: bool,
    pub featured: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ModeratedEntity for Entity {
    fn approved_column() -> Column {
        Column::Approved
    }

    fn featured_column() -> Option<Column> {
        Some(Column::Featured)
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }
}

impl From<Model> for aura_core::domain::Testimonial {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            client_name: model.client_name,
            email: model.email,
            rating: u8::try_from(model.rating).unwrap_or(0),
            testimonial_text: model.testimonial_text,
            issue: model.issue,
            outcome: model.outcome,
            session_type: model.session_type,
            location: model.location,
            approved: model.approved,
            featured: model.featured,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<aura_core::domain::Testimonial> for ActiveModel {
    fn from(t: aura_core::domain::Testimonial) -> Self {
        Self {
            id: Set(t.id),
            client_name: Set(t.client_name),
            email: Set(t.email),
            rating: Set(i16::from(t.rating)),
            testimonial_text: Set(t.testimonial_text),
            issue: Set(t.issue),
            outcome: Set(t.outcome),
            session_type: Set(t.session_type),
            location: Set(t.location),
            approved: Set(t.approved),
            featured: Set(t.featured),
            created_at: Set(t.created_at.into()),
            updated_at: Set(t.updated_at.into()),
        }
    }
}
