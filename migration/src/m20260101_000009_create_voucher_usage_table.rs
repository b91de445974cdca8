use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000006_create_voucher_table::Voucher, m20260101_000007_create_order_table::Orders,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VoucherUsage::Table)
                    .if_not_exists()
                    .col(pk_auto(VoucherUsage::Id))
                    .col(integer(VoucherUsage::VoucherId))
                    .col(integer(VoucherUsage::UserId))
                    .col(integer(VoucherUsage::OrderId))
                    .col(big_integer(VoucherUsage::Discount))
                    .col(timestamp_with_time_zone(VoucherUsage::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_voucher_usage_voucher_id")
                            .from(VoucherUsage::Table, VoucherUsage::VoucherId)
                            .to(Voucher::Table, Voucher::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_voucher_usage_order_id")
                            .from(VoucherUsage::Table, VoucherUsage::OrderId)
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
            .drop_table(Table::drop().table(VoucherUsage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VoucherUsage {
    Table,
    Id,
    VoucherId,
    UserId,
    OrderId,
    Discount,
    CreatedAt,
}
