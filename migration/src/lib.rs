pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_user_table;
mod m20260101_000002_create_brand_table;
mod m20260101_000003_create_category_table;
mod m20260101_000004_create_product_table;
mod m20260101_000005_create_inventory_movement_table;
mod m20260101_000006_create_voucher_table;
mod m20260101_000007_create_order_table;
mod m20260101_000008_create_order_item_table;
mod m20260101_000009_create_voucher_usage_table;
mod m20260101_000010_create_delivery_table;
mod m20260101_000011_create_delivery_event_table;
mod m20260101_000012_create_invoice_table;
mod m20260101_000013_create_invoice_order_table;
mod m20260101_000014_create_debt_table;
mod m20260101_000015_create_debt_item_table;
mod m20260101_000016_create_debt_payment_table;
mod m20260101_000017_create_notification_table;
mod m20260101_000018_create_translation_table;
mod m20260101_000019_create_homepage_table;
mod m20260101_000020_create_news_table;
mod m20260101_000021_create_activity_table;
mod m20260101_000022_create_advertisement_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_user_table::Migration),
            Box::new(m20260101_000002_create_brand_table::Migration),
            Box::new(m20260101_000003_create_category_table::Migration),
            Box::new(m20260101_000004_create_product_table::Migration),
            Box::new(m20260101_000005_create_inventory_movement_table::Migration),
            Box::new(m20260101_000006_create_voucher_table::Migration),
            Box::new(m20260101_000007_create_order_table::Migration),
            Box::new(m20260101_000008_create_order_item_table::Migration),
            Box::new(m20260101_000009_create_voucher_usage_table::Migration),
            Box::new(m20260101_000010_create_delivery_table::Migration),
            Box::new(m20260101_000011_create_delivery_event_table::Migration),
            Box::new(m20260101_000012_create_invoice_table::Migration),
            Box::new(m20260101_000013_create_invoice_order_table::Migration),
            Box::new(m20260101_000014_create_debt_table::Migration),
            Box::new(m20260101_000015_create_debt_item_table::Migration),
            Box::new(m20260101_000016_create_debt_payment_table::Migration),
            Box::new(m20260101_000017_create_notification_table::Migration),
            Box::new(m20260101_000018_create_translation_table::Migration),
            Box::new(m20260101_000019_create_homepage_table::Migration),
            Box::new(m20260101_000020_create_news_table::Migration),
            Box::new(m20260101_000021_create_activity_table::Migration),
            Box::new(m20260101_000022_create_advertisement_table::Migration),
        ]
    }
}
