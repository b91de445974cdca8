use crate::{
    model::order::OrderStatus,
    server::{config::ShopSettings, error::AppError, service::dashboard::DashboardService},
};
use test_utils::{builder::TestBuilder, factory};

/// Tests the overview over a small shop.
///
/// Expected: every status listed, revenue from the delivered order only, one low
/// stock product and one customer
#[tokio::test]
async fn summarizes_orders_and_catalog() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_admin(db).await?;
    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .price(120_000)
        .stock(20)
        .build()
        .await?;
    factory::product::ProductFactory::new(db)
        .stock(2)
        .build()
        .await?;

    factory::create_order(db, customer.id, &product).await?;
    factory::order::OrderFactory::new(db, customer.id, &product)
        .status("delivered")
        .payment_status("paid")
        .build()
        .await?;

    let overview = DashboardService::new(db, ShopSettings::default())
        .overview()
        .await?;

    assert_eq!(overview.orders_by_status.len(), OrderStatus::ALL.len());
    assert_eq!(overview.orders_by_status["pending"], 1);
    assert_eq!(overview.orders_by_status["delivered"], 1);
    assert_eq!(overview.orders_by_status["returned"], 0);
    assert_eq!(overview.revenue, 120_000);
    assert_eq!(overview.paid_revenue, 120_000);
    assert_eq!(overview.active_products, 2);
    assert_eq!(overview.low_stock_products, 1);
    assert_eq!(overview.customers, 1);
    assert_eq!(overview.outstanding_debt, 0);

    Ok(())
}
