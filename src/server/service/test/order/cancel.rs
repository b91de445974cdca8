use super::*;

/// Tests a customer cancelling their pending order that used a voucher.
///
/// Expected: Ok in `cancelled`, stock restored and the voucher use released
#[tokio::test]
async fn restocks_and_releases_voucher() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .stock(4)
        .build()
        .await?;
    let voucher = factory::create_voucher(db).await?;

    let service = OrderService::new(db, &cache, ShopSettings::default());
    let order = service
        .place(place_param(
            customer.id,
            vec![(product.id, 3)],
            Some(voucher.code.clone()),
        ))
        .await?;

    let cancelled = service
        .cancel_by_customer(customer.id, order.id, Some("Changed my mind".to_string()))
        .await?;

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("Changed my mind"));

    let stored = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(stored.stock, 4);

    let voucher = VoucherRepository::new(db).find_by_id(voucher.id).await?.unwrap();
    assert_eq!(voucher.used_count, 0);

    Ok(())
}

/// Tests cancelling an order that is no longer pending.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_cancel_after_confirmation() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let order = factory::order::OrderFactory::new(db, customer.id, &product)
        .status("confirmed")
        .build()
        .await?;

    let result = OrderService::new(db, &cache, ShopSettings::default())
        .cancel_by_customer(customer.id, order.id, None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests cancelling somebody else's order.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn hides_other_customers_orders() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let (_, _, order) = factory::helpers::create_order_with_dependencies(db).await?;
    let stranger = factory::create_user(db).await?;

    let result = OrderService::new(db, &cache, ShopSettings::default())
        .cancel_by_customer(stranger.id, order.id, None)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
