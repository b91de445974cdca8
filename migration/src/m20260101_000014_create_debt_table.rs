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
                    .table(Debt::Table)
                    .if_not_exists()
                    .col(pk_auto(Debt::Id))
                    .col(integer(Debt::UserId))
                    .col(big_integer(Debt::TotalAmount))
                    .col(big_integer(Debt::PaidAmount).default(0))
                    .col(string(Debt::Status))
                    .col(timestamp_with_time_zone_null(Debt::DueDate))
                    .col(text_null(Debt::Note))
                    .col(timestamp_with_time_zone(Debt::CreatedAt))
                    .col(timestamp_with_time_zone(Debt::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_debt_user_id")
                            .from(Debt::Table, Debt::UserId)
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
            .drop_table(Table::drop().table(Debt::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Debt {
    Table,
    Id,
    UserId,
    TotalAmount,
    PaidAmount,
    Status,
    DueDate,
    Note,
    CreatedAt,
    UpdatedAt,
}
