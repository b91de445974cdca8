use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000014_create_debt_table::Debt;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DebtPayment::Table)
                    .if_not_exists()
                    .col(pk_auto(DebtPayment::Id))
                    .col(integer(DebtPayment::DebtId))
                    .col(big_integer(DebtPayment::Amount))
                    .col(string(DebtPayment::Method))
                    .col(text_null(DebtPayment::Note))
                    .col(integer_null(DebtPayment::RecordedBy))
                    .col(timestamp_with_time_zone(DebtPayment::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_debt_payment_debt_id")
                            .from(DebtPayment::Table, DebtPayment::DebtId)
                            .to(Debt::Table, Debt::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DebtPayment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DebtPayment {
    Table,
    Id,
    DebtId,
    Amount,
    Method,
    Note,
    RecordedBy,
    CreatedAt,
}
