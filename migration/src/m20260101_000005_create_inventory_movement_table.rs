use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000004_create_product_table::Product;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InventoryMovement::Table)
                    .if_not_exists()
                    .col(pk_auto(InventoryMovement::Id))
                    .col(integer(InventoryMovement::ProductId))
                    .col(string(InventoryMovement::Kind))
                    .col(integer(InventoryMovement::Quantity))
                    .col(integer(InventoryMovement::StockBefore))
                    .col(integer(InventoryMovement::StockAfter))
                    .col(string_null(InventoryMovement::Reference))
                    .col(text_null(InventoryMovement::Note))
                    .col(integer_null(InventoryMovement::UserId))
                    .col(timestamp_with_time_zone(InventoryMovement::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_movement_product_id")
                            .from(InventoryMovement::Table, InventoryMovement::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryMovement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InventoryMovement {
    Table,
    Id,
    ProductId,
    Kind,
    Quantity,
    StockBefore,
    StockAfter,
    Reference,
    Note,
    UserId,
    CreatedAt,
}
