use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000007_create_order_table::Orders, m20260101_000012_create_invoice_table::Invoice,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InvoiceOrder::Table)
                    .if_not_exists()
                    .col(integer(InvoiceOrder::InvoiceId))
                    .col(integer(InvoiceOrder::OrderId))
                    .primary_key(
                        Index::create()
                            .col(InvoiceOrder::InvoiceId)
                            .col(InvoiceOrder::OrderId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_order_invoice_id")
                            .from(InvoiceOrder::Table, InvoiceOrder::InvoiceId)
                            .to(Invoice::Table, Invoice::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoice_order_order_id")
                            .from(InvoiceOrder::Table, InvoiceOrder::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InvoiceOrder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InvoiceOrder {
    Table,
    InvoiceId,
    OrderId,
}
