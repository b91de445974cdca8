use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(pk_auto(Activity::Id))
                    .col(string(Activity::Title))
                    .col(text_null(Activity::Description))
                    .col(string_null(Activity::Location))
                    .col(string_null(Activity::ImageUrl))
                    .col(timestamp_with_time_zone(Activity::StartAt))
                    .col(timestamp_with_time_zone(Activity::EndAt))
                    .col(boolean(Activity::Active).default(true))
                    .col(timestamp_with_time_zone(Activity::CreatedAt))
                    .col(timestamp_with_time_zone(Activity::UpdatedAt))

                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Activity {
    Table,
    Id,
    Title,
    Description,
    Location,
    ImageUrl,
    StartAt,
    EndAt,
    Active,
    CreatedAt,
    UpdatedAt,
}
