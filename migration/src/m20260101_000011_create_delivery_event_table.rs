use sea_orm_migration::{prelude::*, schema::*};

use super::m20260101_000010_create_delivery_table::Delivery;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeliveryEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(DeliveryEvent::Id))
                    .col(integer(DeliveryEvent::DeliveryId))
                    .col(string(DeliveryEvent::Status))
                    .col(string_null(DeliveryEvent::Location))
                    .col(text_null(DeliveryEvent::Description))
                    .col(timestamp_with_time_zone(DeliveryEvent::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_delivery_event_delivery_id")
                            .from(DeliveryEvent::Table, DeliveryEvent::DeliveryId)
                            .to(Delivery::Table, Delivery::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeliveryEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DeliveryEvent {
    Table,
    Id,
    DeliveryId,
    Status,
    Location,
    Description,
    CreatedAt,
}
