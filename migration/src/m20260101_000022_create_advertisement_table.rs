use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advertisement::Table)
                    .if_not_exists()
                    .col(pk_auto(Advertisement::Id))
                    .col(string(Advertisement::Title))
                    .col(string(Advertisement::ImageUrl))
                    .col(string_null(Advertisement::LinkUrl))
                    .col(string(Advertisement::Position))
                    .col(integer(Advertisement::SortOrder).default(0))
                    .col(timestamp_with_time_zone_null(Advertisement::StartAt))
                    .col(timestamp_with_time_zone_null(Advertisement::EndAt))
                    .col(boolean(Advertisement::Active).default(true))
                    .col(big_integer(Advertisement::Clicks).default(0))
                    .col(big_integer(Advertisement::Impressions).default(0))
                    .col(timestamp_with_time_zone(Advertisement::CreatedAt))
                    .col(timestamp_with_time_zone(Advertisement::UpdatedAt))

                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Advertisement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Advertisement {
    Table,
    Id,
    Title,
    ImageUrl,
    LinkUrl,
    Position,
    SortOrder,
    StartAt,
    EndAt,
    Active,
    Clicks,
    Impressions,
    CreatedAt,
    UpdatedAt,
}
