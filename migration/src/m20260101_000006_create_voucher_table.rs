use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Voucher::Table)
                    .if_not_exists()
                    .col(pk_auto(Voucher::Id))
                    .col(string_uniq(Voucher::Code))
                    .col(text_null(Voucher::Description))
                    .col(string(Voucher::DiscountType))
                    .col(big_integer(Voucher::DiscountValue))
                    .col(big_integer_null(Voucher::MaxDiscount))
                    .col(big_integer(Voucher::MinOrderValue).default(0))
                    .col(timestamp_with_time_zone(Voucher::StartAt))
                    .col(timestamp_with_time_zone(Voucher::EndAt))
                    .col(integer_null(Voucher::UsageLimit))
                    .col(integer(Voucher::UsedCount).default(0))
                    .col(integer(Voucher::PerUserLimit).default(1))
                    .col(boolean(Voucher::Active).default(true))
                    .col(timestamp_with_time_zone(Voucher::CreatedAt))
                    .col(timestamp_with_time_zone(Voucher::UpdatedAt))

                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Voucher::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Voucher {
    Table,
    Id,
    Code,
    Description,
    DiscountType,
    DiscountValue,
    MaxDiscount,
    MinOrderValue,
    StartAt,
    EndAt,
    UsageLimit,
    UsedCount,
    PerUserLimit,
    Active,
    CreatedAt,
    UpdatedAt,
}
