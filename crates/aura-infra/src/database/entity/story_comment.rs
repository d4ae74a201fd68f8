//! Story comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::database::postgres_repo::ModeratedEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "story_comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub story_id: Uuid,
    pub author_name: String,
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub approved: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_story::Entity",
        from = "Column::StoryId",
        to = "super::user_story::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Story,
}

impl Related<super::user_story::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Story.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ModeratedEntity for Entity {
    fn approved_column() -> Column {
        Column::Approved
    }

    fn featured_column() -> Option<Column> {
        None
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }
}

impl From<Model> for aura_core::domain::StoryComment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            story_id: model.story_id,
            author_name: model.author_name,
            email: model.email,
            text: model.text,
            approved: model.approved,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<aura_core::domain::StoryComment> for ActiveModel {
    fn from(c: aura_core::domain::StoryComment) -> Self {
        Self {
            id: Set(c.id),
            story_id: Set(c.story_id),
            author_name: Set(c.author_name),
            email: Set(c.email),
            text: Set(c.text),
            approved: Set(c.approved),
            created_at: Set(c.created_at.into()),
            updated_at: Set(c.updated_at.into()),
        }
    }
}
