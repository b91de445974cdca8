use super::test_cache;
use crate::{
    model::{
        delivery::DeliveryStatus,
        order::{OrderStatus, PaymentStatus},
    },
    server::{
        data::{order::OrderRepository, product::ProductRepository},
        error::AppError,
        model::delivery::{AddDeliveryEventParam, CreateDeliveryParam},
        service::delivery::DeliveryService,
    },
};
use test_utils::{builder::TestBuilder, factory};

fn shipment(order_id: i32) -> CreateDeliveryParam {
    CreateDeliveryParam {
        order_id,
        carrier: "GHN".to_string(),
        tracking_code: "GHN123456".to_string(),
        estimated_delivery: None,
    }
}

fn event(status: DeliveryStatus) -> AddDeliveryEventParam {
    AddDeliveryEventParam {
        status,
        location: Some("Hub".to_string()),
        description: None,
    }
}

/// Tests shipping an order that has not been confirmed.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn requires_confirmed_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let (_, _, order) = factory::helpers::create_order_with_dependencies(db).await?;

    let result = DeliveryService::new(db, &cache).create(shipment(order.id)).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests creating a delivery and following it through to the doorstep.
///
/// Expected: the order moves to `shipping`, a second delivery is a conflict, and the
/// `delivered` event leaves the cash-on-delivery order delivered and paid
#[tokio::test]
async fn delivery_drives_order_to_delivered() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
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

    let service = DeliveryService::new(db, &cache);
    let delivery = service.create(shipment(order.id)).await?;
    assert_eq!(delivery.status, DeliveryStatus::Pending);

    let orders = OrderRepository::new(db);
    assert_eq!(
        orders.find_by_id(order.id).await?.unwrap().status,
        OrderStatus::Shipping
    );

    let duplicate = service.create(shipment(order.id)).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    for status in [
        DeliveryStatus::PickedUp,
        DeliveryStatus::InTransit,
        DeliveryStatus::OutForDelivery,
        DeliveryStatus::Delivered,
    ] {
        service.add_event(delivery.id, event(status)).await?;
    }

    let delivery = service.get(delivery.id).await?;
    assert_eq!(delivery.status, DeliveryStatus::Delivered);
    assert_eq!(delivery.events.len(), 5);
    assert!(delivery.delivered_at.is_some());

    let order = orders.find_by_id(order.id).await?.unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);
    assert_eq!(order.payment_status, PaymentStatus::Paid);

    Ok(())
}

/// Tests skipping delivery steps and a failed delivery that comes back.
///
/// Expected: Err(AppError::BadRequest) for the skip; the return restocks the order
#[tokio::test]
async fn failed_delivery_can_be_returned() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
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
    let order = factory::order::OrderFactory::new(db, customer.id, &product)
        .quantity(2)
        .status("confirmed")
        .build()
        .await?;

    let service = DeliveryService::new(db, &cache);
    let delivery = service.create(shipment(order.id)).await?;

    let skipped = service
        .add_event(delivery.id, event(DeliveryStatus::Delivered))
        .await;
    assert!(matches!(skipped, Err(AppError::BadRequest(_))));

    service
        .add_event(delivery.id, event(DeliveryStatus::Failed))
        .await?;
    let returned = service
        .add_event(delivery.id, event(DeliveryStatus::Returned))
        .await?;
    assert_eq!(returned.status, DeliveryStatus::Returned);

    let order = OrderRepository::new(db).find_by_id(order.id).await?.unwrap();
    assert_eq!(order.status, OrderStatus::Returned);
    let stored = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(stored.stock, 7);

    Ok(())
}

/// Tests tracking lookups by the owner, an admin and another customer.
///
/// Expected: Ok for the owner and the admin, Err(AppError::NotFound) for anyone else
#[tokio::test]
async fn tracking_is_visible_to_owner_and_admin() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let admin = factory::create_admin(db).await?;
    let stranger = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let order = factory::order::OrderFactory::new(db, customer.id, &product)
        .status("confirmed")
        .build()
        .await?;

    let service = DeliveryService::new(db, &cache);
    let delivery = service.create(shipment(order.id)).await?;

    assert_eq!(service.tracking(customer.id, false, order.id).await?.id, delivery.id);
    assert_eq!(service.tracking(admin.id, true, order.id).await?.id, delivery.id);

    let hidden = service.tracking(stranger.id, false, order.id).await;
    assert!(matches!(hidden, Err(AppError::NotFound(_))));

    Ok(())
}
