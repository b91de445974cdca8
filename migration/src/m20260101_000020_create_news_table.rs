use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(pk_auto(News::Id))
                    .col(string(News::Title))
                    .col(string_uniq(News::Slug))
                    .col(text_null(News::Summary))
                    .col(text(News::Content))
                    .col(string_null(News::CoverImageUrl))
                    .col(boolean(News::Published).default(false))
                    .col(timestamp_with_time_zone_null(News::PublishedAt))
                    .col(integer_null(News::AuthorId))
                    .col(timestamp_with_time_zone(News::CreatedAt))
                    .col(timestamp_with_time_zone(News::UpdatedAt))

                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum News {
    Table,
    Id,
    Title,
    Slug,
    Summary,
    Content,
    CoverImageUrl,
    Published,
    PublishedAt,
    AuthorId,
    CreatedAt,
    UpdatedAt,
}
