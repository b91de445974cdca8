use super::*;

/// Tests placing an order with a percentage voucher below the free shipping threshold.
///
/// Expected: Ok with discounted totals, stock decremented, voucher usage recorded
/// and the customer notified
#[tokio::test]
async fn places_order_with_voucher() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .price(200_000)
        .stock(5)
        .build()
        .await?;
    let voucher = factory::voucher::VoucherFactory::new(db)
        .percent(10)
        .build()
        .await?;

    let service = OrderService::new(db, &cache, ShopSettings::default());
    let order = service
        .place(place_param(
            customer.id,
            vec![(product.id, 2)],
            Some(voucher.code.clone()),
        ))
        .await?;

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Unpaid);
    assert_eq!(order.subtotal, 400_000);
    assert_eq!(order.discount, 40_000);
    assert_eq!(order.shipping_fee, 30_000);
    assert_eq!(order.total, 390_000);
    assert_eq!(order.voucher_code.as_deref(), Some(voucher.code.as_str()));
    assert_eq!(order.items.len(), 1);

    let stored = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(stored.stock, 3);

    let voucher = VoucherRepository::new(db).find_by_id(voucher.id).await?.unwrap();
    assert_eq!(voucher.used_count, 1);

    assert_eq!(NotificationRepository::new(db).unread_count(customer.id).await?, 1);

    Ok(())
}

/// Tests that shipping is waived once the discounted subtotal reaches the threshold.
///
/// Expected: Ok with a zero shipping fee
#[tokio::test]
async fn waives_shipping_over_threshold() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .price(250_000)
        .stock(5)
        .build()
        .await?;

    let order = OrderService::new(db, &cache, ShopSettings::default())
        .place(place_param(customer.id, vec![(product.id, 2)], None))
        .await?;

    assert_eq!(order.subtotal, 500_000);
    assert_eq!(order.shipping_fee, 0);
    assert_eq!(order.total, 500_000);

    Ok(())
}

/// Tests that lines for the same product are merged and priced at the sale price.
///
/// Expected: Ok with a single item carrying the combined quantity
#[tokio::test]
async fn merges_duplicate_lines() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .price(100_000)
        .sale_price(Some(80_000))
        .stock(10)
        .build()
        .await?;

    let order = OrderService::new(db, &cache, ShopSettings::default())
        .place(place_param(
            customer.id,
            vec![(product.id, 1), (product.id, 2)],
            None,
        ))
        .await?;

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(order.items[0].unit_price, 80_000);
    assert_eq!(order.subtotal, 240_000);

    Ok(())
}

/// Tests ordering more units than are in stock.
///
/// Expected: Err(AppError::BadRequest) and the stock is untouched
#[tokio::test]
async fn rejects_insufficient_stock() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .stock(1)
        .build()
        .await?;

    let result = OrderService::new(db, &cache, ShopSettings::default())
        .place(place_param(customer.id, vec![(product.id, 2)], None))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    let stored = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(stored.stock, 1);

    Ok(())
}

/// Tests placing an order without lines or for an inactive product.
///
/// Expected: Err(AppError::BadRequest) in both cases
#[tokio::test]
async fn rejects_empty_or_unavailable_lines() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let hidden = factory::product::ProductFactory::new(db)
        .active(false)
        .build()
        .await?;

    let service = OrderService::new(db, &cache, ShopSettings::default());

    let empty = service.place(place_param(customer.id, vec![], None)).await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    let unavailable = service
        .place(place_param(customer.id, vec![(hidden.id, 1)], None))
        .await;
    assert!(matches!(unavailable, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests redeeming a one-per-customer voucher twice.
///
/// Expected: Ok for the first order, Err(AppError::BadRequest) for the second
#[tokio::test]
async fn enforces_per_user_voucher_limit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let voucher = factory::voucher::VoucherFactory::new(db)
        .per_user_limit(1)
        .build()
        .await?;

    let service = OrderService::new(db, &cache, ShopSettings::default());

    service
        .place(place_param(
            customer.id,
            vec![(product.id, 1)],
            Some(voucher.code.clone()),
        ))
        .await?;
    let second = service
        .place(place_param(
            customer.id,
            vec![(product.id, 1)],
            Some(voucher.code.clone()),
        ))
        .await;

    assert!(matches!(second, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests placing an order with a code no voucher has.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn unknown_voucher_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;

    let result = OrderService::new(db, &cache, ShopSettings::default())
        .place(place_param(
            customer.id,
            vec![(product.id, 1)],
            Some("NOSUCHCODE".to_string()),
        ))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that quantities or prices too large to total are rejected before any write.
///
/// Expected: Err(BadRequest) for merged quantities past `i32::MAX` and for a line total
/// past `i64::MAX`, with stock untouched
#[tokio::test]
async fn rejects_overflowing_totals() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db).build().await?;
    let pricey = factory::product::ProductFactory::new(db)
        .price(i64::MAX / 2 + 1)
        .build()
        .await?;

    let service = OrderService::new(db, &cache, ShopSettings::default());

    let result = service
        .place(place_param(
            customer.id,
            vec![(product.id, i32::MAX), (product.id, 2)],
            None,
        ))
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = service
        .place(place_param(customer.id, vec![(pricey.id, 2)], None))
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let stored = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(stored.stock, 10);
    let stored = ProductRepository::new(db).find_by_id(pricey.id).await?.unwrap();
    assert_eq!(stored.stock, 10);

    Ok(())
}
