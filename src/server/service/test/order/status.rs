use super::*;

/// Tests walking a cash-on-delivery order through to delivery.
///
/// Expected: Ok at every step, and the delivered order is paid
#[tokio::test]
async fn delivered_cod_order_becomes_paid() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let (customer, _, order) = factory::helpers::create_order_with_dependencies(db).await?;

    let service = OrderService::new(db, &cache, ShopSettings::default());
    service.update_status(order.id, OrderStatus::Confirmed, None).await?;
    service.update_status(order.id, OrderStatus::Shipping, None).await?;
    let delivered = service
        .update_status(order.id, OrderStatus::Delivered, None)
        .await?;

    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert_eq!(delivered.payment_status, PaymentStatus::Paid);
    assert_eq!(NotificationRepository::new(db).unread_count(customer.id).await?, 3);

    Ok(())
}

/// Tests skipping a step and leaving a terminal status.
///
/// Expected: Err(AppError::BadRequest) for both moves
#[tokio::test]
async fn rejects_illegal_transitions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let pending = factory::create_order(db, customer.id, &product).await?;
    let delivered = factory::order::OrderFactory::new(db, customer.id, &product)
        .status("delivered")
        .build()
        .await?;

    let service = OrderService::new(db, &cache, ShopSettings::default());

    let skipped = service
        .update_status(pending.id, OrderStatus::Delivered, None)
        .await;
    assert!(matches!(skipped, Err(AppError::BadRequest(_))));

    let reopened = service
        .update_status(delivered.id, OrderStatus::Pending, None)
        .await;
    assert!(matches!(reopened, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests an admin returning a shipped order.
///
/// Expected: Ok in `returned` with the units back in stock
#[tokio::test]
async fn returned_order_restocks() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .stock(7)
        .build()
        .await?;
    let order = factory::order::OrderFactory::new(db, customer.id, &product)
        .quantity(2)
        .status("shipping")
        .build()
        .await?;

    let returned = OrderService::new(db, &cache, ShopSettings::default())
        .update_status(order.id, OrderStatus::Returned, Some("Damaged".to_string()))
        .await?;

    assert_eq!(returned.status, OrderStatus::Returned);
    let stored = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(stored.stock, 9);

    Ok(())
}

/// Tests two admins cancelling the same pending order at once.
///
/// Expected: exactly one Ok, the other Err(BadRequest), and stock restored only once
#[tokio::test]
async fn concurrent_cancels_restock_once() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .stock(5)
        .build()
        .await?;

    let service = OrderService::new(db, &cache, ShopSettings::default());
    let order = service
        .place(place_param(customer.id, vec![(product.id, 2)], None))
        .await?;

    let (first, second) = tokio::join!(
        service.update_status(order.id, OrderStatus::Cancelled, None),
        service.update_status(order.id, OrderStatus::Cancelled, None),
    );

    assert_eq!([first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(), 1);
    assert!(matches!(
        first.and(second),
        Err(AppError::BadRequest(_))
    ));

    let stored = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(stored.stock, 5);

    Ok(())
}

/// Tests applying a transition from a snapshot taken before the order moved on.
///
/// Expected: Err(AppError::Conflict) and no restock
#[tokio::test]
async fn stale_snapshot_cannot_transition() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .stock(5)
        .build()
        .await?;

    let service = OrderService::new(db, &cache, ShopSettings::default());
    let snapshot = service
        .place(place_param(customer.id, vec![(product.id, 2)], None))
        .await?;
    service.update_status(snapshot.id, OrderStatus::Confirmed, None).await?;
    service.update_status(snapshot.id, OrderStatus::Shipping, None).await?;

    let result = apply_transition(db, &snapshot, OrderStatus::Cancelled, None).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let stored = service.get(snapshot.id).await?;
    assert_eq!(stored.status, OrderStatus::Shipping);
    let product = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(product.stock, 3);

    Ok(())
}
