use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Testimonials::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Testimonials::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Testimonials::ClientName).string().not_null())
                    .col(ColumnDef::new(Testimonials::Email).string().not_null())
                    .col(ColumnDef::new(Testimonials::Rating).small_integer().not_null())
                    .col(ColumnDef::new(Testimonials::TestimonialText).text().not_null())
                    .col(ColumnDef::new(Testimonials::Issue).string())
                    .col(ColumnDef::new(Testimonials::Outcome).string())
                    .col(ColumnDef::new(Testimonials::SessionType).string())
                    .col(ColumnDef::new(Testimonials::Location).string())
                    .col(
                        ColumnDef::new(Testimonials::Approved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Testimonials::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Testimonials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Testimonials::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_testimonials_approved_created")
                    .table(Testimonials::Table)
                    .col(Testimonials::Approved)
                    .col(Testimonials::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserStories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserStories::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserStories::AuthorName).string().not_null())
                    .col(ColumnDef::new(UserStories::Email).string().not_null())
                    .col(ColumnDef::new(UserStories::Title).string().not_null())
                    .col(ColumnDef::new(UserStories::Story).text().not_null())
                    .col(ColumnDef::new(UserStories::PainType).string())
                    .col(ColumnDef::new(UserStories::Duration).string())
                    .col(ColumnDef::new(UserStories::WhatHelped).text())
                    .col(ColumnDef::new(UserStories::WhatDidntHelp).text())
                    .col(ColumnDef::new(UserStories::Status).string())
                    .col(ColumnDef::new(UserStories::Category).string())
                    .col(ColumnDef::new(UserStories::Location).string())
                    .col(ColumnDef::new(UserStories::Age).integer())
                    .col(
                        ColumnDef::new(UserStories::Approved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserStories::Featured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UserStories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserStories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StoryComments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StoryComments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(StoryComments::StoryId).uuid().not_null())
                    .col(ColumnDef::new(StoryComments::AuthorName).string().not_null())
                    .col(ColumnDef::new(StoryComments::Email).string().not_null())
                    .col(ColumnDef::new(StoryComments::Text).text().not_null())
                    .col(
                        ColumnDef::new(StoryComments::Approved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StoryComments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StoryComments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_story_comments_story")
                            .from(StoryComments::Table, StoryComments::StoryId)
                            .to(UserStories::Table, UserStories::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_story_comments_story")
                    .table(StoryComments::Table)
                    .col(StoryComments::StoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StoryComments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserStories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Testimonials::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Testimonials {
    Table,
    Id,
    ClientName,
    Email,
    Rating,
    TestimonialText,
    Issue,
    Outcome,
    SessionType,
    Location,
    Approved,
    Featured,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserStories {
    Table,
    Id,
    AuthorName,
    Email,
    Title,
    Story,
    PainType,
    Duration,
    WhatHelped,
    WhatDidntHelp,
    Status,
    Category,
    Location,
    Age,
    Approved,
    Featured,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StoryComments {
    Table,
    Id,
    StoryId,
    AuthorName,
    Email,
    Text,
    Approved,
    CreatedAt,
    UpdatedAt,
}
