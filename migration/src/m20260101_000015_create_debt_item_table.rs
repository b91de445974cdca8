use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000007_create_order_table::Orders, m20260101_000014_create_debt_table::Debt,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DebtItem::Table)
                    .if_not_exists()
                    .col(pk_auto(DebtItem::Id))
                    .col(integer(DebtItem::DebtId))
                    .col(integer(DebtItem::OrderId))
                    .col(big_integer(DebtItem::Amount))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_debt_item_debt_id")
                            .from(DebtItem::Table, DebtItem::DebtId)
                            .to(Debt::Table, Debt::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_debt_item_order_id")
                            .from(DebtItem::Table, DebtItem::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DebtItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DebtItem {
    Table,
    Id,
    DebtId,
    OrderId,
    Amount,
}
