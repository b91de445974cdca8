use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000007_create_order_table::Orders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Delivery::Table)
                    .if_not_exists()
                    .col(pk_auto(Delivery::Id))
                    .col(integer_uniq(Delivery::OrderId))
                    .col(string(Delivery::Carrier))
                    .col(string(Delivery::TrackingCode))
                    .col(string(Delivery::Status))
                    .col(timestamp_with_time_zone_null(Delivery::EstimatedDelivery))
                    .col(timestamp_with_time_zone_null(Delivery::DeliveredAt))
                    .col(timestamp_with_time_zone(Delivery::CreatedAt))
                    .col(timestamp_with_time_zone(Delivery::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_delivery_order_id")
                            .from(Delivery::Table, Delivery::OrderId)
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
            .drop_table(Table::drop().table(Delivery::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Delivery {
    Table,
    Id,
    OrderId,
    Carrier,
    TrackingCode,
    Status,
    EstimatedDelivery,
    DeliveredAt,
    CreatedAt,
    UpdatedAt,
}
