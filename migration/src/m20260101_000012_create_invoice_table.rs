use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoice::Table)
                    .if_not_exists()
                    .col(pk_auto(Invoice::Id))
                    .col(string_uniq(Invoice::Number))
                    .col(integer(Invoice::UserId))
                    .col(big_integer(Invoice::Amount))
                    .col(string(Invoice::Status))
                    .col(timestamp_with_time_zone_null(Invoice::DueDate))
                    .col(text_null(Invoice::Note))
                    .col(timestamp_with_time_zone_null(Invoice::IssuedAt))
                    .col(timestamp_with_time_zone_null(Invoice::PaidAt))
                    .col(timestamp_with_time_zone(Invoice::CreatedAt))
                    .col(timestamp_with_time_zone(Invoice::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_user_id")
                            .from(Invoice::Table, Invoice::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoice::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Invoice {
    Table,
    Id,
    Number,
    UserId,
    Amount,
    Status,
    DueDate,
    Note,
    IssuedAt,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}
