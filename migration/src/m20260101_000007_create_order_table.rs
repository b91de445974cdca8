use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000001_create_user_table::User, m20260101_000006_create_voucher_table::Voucher,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(string_uniq(Orders::Code))
                    .col(integer(Orders::UserId))
                    .col(string(Orders::Status))
                    .col(string(Orders::PaymentStatus))
                    .col(string(Orders::PaymentMethod))
                    .col(big_integer(Orders::Subtotal))
                    .col(big_integer(Orders::Discount))
                    .col(big_integer(Orders::ShippingFee))
                    .col(big_integer(Orders::Total))
                    .col(integer_null(Orders::VoucherId))
                    .col(string_null(Orders::VoucherCode))
                    .col(string(Orders::ShippingName))
                    .col(string(Orders::ShippingPhone))
                    .col(text(Orders::ShippingAddress))
                    .col(text_null(Orders::Note))
                    .col(text_null(Orders::CancelReason))
                    .col(timestamp_with_time_zone(Orders::CreatedAt))
                    .col(timestamp_with_time_zone(Orders::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_user_id")
                            .from(Orders::Table, Orders::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_voucher_id")
                            .from(Orders::Table, Orders::VoucherId)
                            .to(Voucher::Table, Voucher::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Orders {
    Table,
    Id,
    Code,
    UserId,
    Status,
    PaymentStatus,
    PaymentMethod,
    Subtotal,
    Discount,
    ShippingFee,
    Total,
    VoucherId,
    VoucherCode,
    ShippingName,
    ShippingPhone,
    ShippingAddress,
    Note,
    CancelReason,
    CreatedAt,
    UpdatedAt,
}
