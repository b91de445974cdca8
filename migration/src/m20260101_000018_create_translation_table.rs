use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Translation::Table)
                    .if_not_exists()
                    .col(pk_auto(Translation::Id))
                    .col(string(Translation::Locale))
                    .col(string(Translation::Namespace))
                    .col(string(Translation::Key))
                    .col(text(Translation::Value))
                    .col(timestamp_with_time_zone(Translation::UpdatedAt))
                    .index(
                        Index::create()
                            .name("idx_translation_locale_namespace_key")
                            .col(Translation::Locale)
                            .col(Translation::Namespace)
                            .col(Translation::Key)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Translation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Translation {
    Table,
    Id,
    Locale,
    Namespace,
    Key,
    Value,
    UpdatedAt,
}
