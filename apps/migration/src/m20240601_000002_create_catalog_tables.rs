use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `created_at`/`updated_at` pair shared by every catalog table.
fn timestamps<T: Iden + 'static>(table: &mut TableCreateStatement, created: T, updated: T) {
    table
        .col(ColumnDef::new(created).timestamp_with_time_zone().not_null())
        .col(ColumnDef::new(updated).timestamp_with_time_zone().not_null());
}

fn json_list<T: Iden + 'static>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .json_binary()
        .not_null()
        .default(Expr::cust("'[]'::jsonb"))
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut herbs = Table::create()
            .table(Herbs::Table)
            .if_not_exists()
            .col(ColumnDef::new(Herbs::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Herbs::Name).string().not_null())
            .col(ColumnDef::new(Herbs::Slug).string().not_null().unique_key())
            .col(ColumnDef::new(Herbs::Category).string().not_null())
            .col(json_list(Herbs::HealingProperties))
            .col(ColumnDef::new(Herbs::Description).text().not_null())
            .col(ColumnDef::new(Herbs::Physical).text())
            .col(ColumnDef::new(Herbs::Emotional).text())
            .col(ColumnDef::new(Herbs::Benefits).text())
            .col(ColumnDef::new(Herbs::Usage).text())
            .col(json_list(Herbs::Products))
            .to_owned();
        timestamps(&mut herbs, Herbs::CreatedAt, Herbs::UpdatedAt);
        manager.create_table(herbs).await?;

        let mut glossary = Table::create()
            .table(GlossaryTerms::Table)
            .if_not_exists()
            .col(ColumnDef::new(GlossaryTerms::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(GlossaryTerms::Term).string().not_null())
            .col(ColumnDef::new(GlossaryTerms::Slug).string().not_null().unique_key())
            .col(ColumnDef::new(GlossaryTerms::Category).string().not_null())
            .col(ColumnDef::new(GlossaryTerms::SubCategory).string())
            .col(ColumnDef::new(GlossaryTerms::ShortDefinition).text().not_null())
            .col(ColumnDef::new(GlossaryTerms::LongDefinition).text().not_null())
            .col(
                ColumnDef::new(GlossaryTerms::Enrichment)
                    .json_binary()
                    .not_null()
                    .default(Expr::cust("'{}'::jsonb")),
            )
            .col(json_list(GlossaryTerms::RecommendedProducts))
            .to_owned();
        timestamps(&mut glossary, GlossaryTerms::CreatedAt, GlossaryTerms::UpdatedAt);
        manager.create_table(glossary).await?;

        let mut products = Table::create()
            .table(Products::Table)
            .if_not_exists()
            .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Products::Name).string().not_null())
            .col(ColumnDef::new(Products::Slug).string().not_null().unique_key())
            .col(ColumnDef::new(Products::Category).string().not_null())
            .col(ColumnDef::new(Products::Description).text().not_null())
            .col(json_list(Products::Tags))
            .col(ColumnDef::new(Products::Pricing).string().not_null())
            .col(ColumnDef::new(Products::AffiliateLink).string())
            .col(json_list(Products::Pros))
            .col(json_list(Products::Cons))
            .col(json_list(Products::Features))
            .col(json_list(Products::Reviews))
            .to_owned();
        timestamps(&mut products, Products::CreatedAt, Products::UpdatedAt);
        manager.create_table(products).await?;

        let mut affirmations = Table::create()
            .table(Affirmations::Table)
            .if_not_exists()
            .col(ColumnDef::new(Affirmations::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Affirmations::Title).string().not_null())
            .col(ColumnDef::new(Affirmations::Slug).string().not_null().unique_key())
            .col(ColumnDef::new(Affirmations::Text).text().not_null())
            .col(ColumnDef::new(Affirmations::Intention).text().not_null())
            .col(ColumnDef::new(Affirmations::Category).string().not_null())
            .col(json_list(Affirmations::WhenToUse))
            .col(ColumnDef::new(Affirmations::WhyItWorks).text().not_null())
            .col(
                ColumnDef::new(Affirmations::Ritual)
                    .json_binary()
                    .not_null()
                    .default(Expr::cust("'{}'::jsonb")),
            )
            .col(json_list(Affirmations::GlossaryTerms))
            .col(json_list(Affirmations::Products))
            .to_owned();
        timestamps(&mut affirmations, Affirmations::CreatedAt, Affirmations::UpdatedAt);
        manager.create_table(affirmations).await?;

        let mut posts = Table::create()
            .table(BlogPosts::Table)
            .if_not_exists()
            .col(ColumnDef::new(BlogPosts::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(BlogPosts::Title).string().not_null())
            .col(ColumnDef::new(BlogPosts::Slug).string().not_null().unique_key())
            .col(ColumnDef::new(BlogPosts::Content).text().not_null())
            .col(ColumnDef::new(BlogPosts::Excerpt).text())
            .col(ColumnDef::new(BlogPosts::CoverImage).string())
            .col(json_list(BlogPosts::Tags))
            .col(
                ColumnDef::new(BlogPosts::IsPublished)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .to_owned();
        timestamps(&mut posts, BlogPosts::CreatedAt, BlogPosts::UpdatedAt);
        manager.create_table(posts).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Affirmations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GlossaryTerms::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Herbs::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Herbs {
    Table,
    Id,
    Name,
    Slug,
    Category,
    HealingProperties,
    Description,
    Physical,
    Emotional,
    Benefits,
    Usage,
    Products,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GlossaryTerms {
    Table,
    Id,
    Term,
    Slug,
    Category,
    SubCategory,
    ShortDefinition,
    LongDefinition,
    Enrichment,
    RecommendedProducts,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Slug,
    Category,
    Description,
    Tags,
    Pricing,
    AffiliateLink,
    Pros,
    Cons,
    Features,
    Reviews,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Affirmations {
    Table,
    Id,
    Title,
    Slug,
    Text,
    Intention,
    Category,
    WhenToUse,
    WhyItWorks,
    Ritual,
    GlossaryTerms,
    Products,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    Title,
    Slug,
    Content,
    Excerpt,
    CoverImage,
    Tags,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}
