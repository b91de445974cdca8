use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brand::Table)
                    .if_not_exists()
                    .col(pk_auto(Brand::Id))
                    .col(string_uniq(Brand::Name))
                    .col(string_uniq(Brand::Slug))
                    .col(text_null(Brand::Description))
                    .col(string_null(Brand::LogoUrl))
                    .col(timestamp_with_time_zone(Brand::CreatedAt))
                    .col(timestamp_with_time_zone(Brand::UpdatedAt))

                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Brand::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Brand {
    Table,
    Id,
    Name,
    Slug,
    Description,
    LogoUrl,
    CreatedAt,
    UpdatedAt,
}
