use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Homepage::Table)
                    .if_not_exists()
                    .col(integer(Homepage::Id).primary_key())
                    .col(string(Homepage::HeroTitle))
                    .col(string_null(Homepage::HeroSubtitle))
                    .col(string_null(Homepage::HeroImageUrl))
                    .col(json(Homepage::FeaturedProductIds))
                    .col(json(Homepage::FeaturedCategoryIds))
                    .col(timestamp_with_time_zone(Homepage::UpdatedAt))

                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Homepage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Homepage {
    Table,
    Id,
    HeroTitle,
    HeroSubtitle,
    HeroImageUrl,
    FeaturedProductIds,
    FeaturedCategoryIds,
    UpdatedAt,
}
