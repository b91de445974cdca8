use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260101_000002_create_brand_table::Brand, m20260101_000003_create_category_table::Category,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(string(Product::Name))
                    .col(string_uniq(Product::Slug))
                    .col(string_uniq(Product::Sku))
                    .col(text_null(Product::Description))
                    .col(big_integer(Product::Price))
                    .col(big_integer_null(Product::SalePrice))
                    .col(integer(Product::Stock).default(0))
                    .col(integer_null(Product::BrandId))
                    .col(integer_null(Product::CategoryId))
                    .col(string_null(Product::ImageUrl))
                    .col(boolean(Product::Active).default(true))
                    .col(timestamp_with_time_zone(Product::CreatedAt))
                    .col(timestamp_with_time_zone(Product::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_brand_id")
                            .from(Product::Table, Product::BrandId)
                            .to(Brand::Table, Brand::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_category_id")
                            .from(Product::Table, Product::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Product {
    Table,
    Id,
    Name,
    Slug,
    Sku,
    Description,
    Price,
    SalePrice,
    Stock,
    BrandId,
    CategoryId,
    ImageUrl,
    Active,
    CreatedAt,
    UpdatedAt,
}
