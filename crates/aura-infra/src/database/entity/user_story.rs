//! User story entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::database::postgres_repo::ModeratedEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_stories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_name: String,
    pub email: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub story: String,
    pub pain_type: Option<String>,
    pub duration: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub what_helped: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub what_didnt_help: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub age: Option<i32>,
    pub approved: bool,
    pub featured: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::story_comment::Entity")]
    Comments,
}

impl Related<super::story_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

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

impl From<Model> for aura_core::domain::UserStory {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_name: model.author_name,
            email: model.email,
            title: model.title,
            story: model.story,
            pain_type: model.pain_type,
            duration: model.duration,
            what_helped: model.what_helped,
            what_didnt_help: model.what_didnt_help,
            status: model.status,
            category: model.category,
            location: model.location,
            age: model.age.and_then(|a| u16::try_from(a).ok()),
            approved: model.approved,
            featured: model.featured,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<aura_core::domain::UserStory> for ActiveModel {
    fn from(s: aura_core::domain::UserStory) -> Self {
        Self {
            id: Set(s.id),
            author_name: Set(s.author_name),
            email: Set(s.email),
            title: Set(s.title),
            story: Set(s.story),
            pain_type: Set(s.pain_type),
            duration: Set(s.duration),
            what_helped: Set(s.what_helped),
            what_didnt_help: Set(s.what_didnt_help),
            status: Set(s.status),
            category: Set(s.category),
            location: Set(s.location),
            age: Set(s.age.map(i32::from)),
            approved: Set(s.approved),
            featured: Set(s.featured),
            created_at: Set(s.created_at.into()),
            updated_at: Set(s.updated_at.into()),
        }
    }
}
