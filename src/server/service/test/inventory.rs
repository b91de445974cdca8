use super::test_cache;
use crate::{
    model::inventory::MovementKind,
    server::{
        data::{inventory::InventoryRepository, product::ProductRepository},
        error::AppError,
        model::{
            inventory::{CreateMovementParam, MovementFilter},
            pagination::PageRequest,
        },
        service::inventory::InventoryService,
    },
};
use entity::prelude::User;
use test_utils::{builder::TestBuilder, factory};

fn movement(product_id: i32, kind: MovementKind, quantity: i32, user_id: i32) -> CreateMovementParam {
    CreateMovementParam {
        product_id,
        kind,
        quantity,
        note: None,
        user_id,
    }
}

/// Tests an import, an export and an adjustment in a row.
///
/// Expected: stock 10 -> 15 -> 12 -> 20 with one movement recorded per step
#[tokio::test]
async fn applies_manual_movements() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let admin = factory::create_admin(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .stock(10)
        .build()
        .await?;

    let service = InventoryService::new(db, &cache);

    let import = service
        .create_movement(movement(product.id, MovementKind::Import, 5, admin.id))
        .await?;
    assert_eq!((import.stock_before, import.stock_after), (10, 15));

    let export = service
        .create_movement(movement(product.id, MovementKind::Export, 3, admin.id))
        .await?;
    assert_eq!((export.stock_before, export.stock_after), (15, 12));

    let adjustment = service
        .create_movement(movement(product.id, MovementKind::Adjustment, 20, admin.id))
        .await?;
    assert_eq!(adjustment.stock_after, 20);

    let stored = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(stored.stock, 20);

    let history = InventoryRepository::new(db)
        .list(
            MovementFilter {
                product_id: Some(product.id),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;
    assert_eq!(history.total, 3);

    Ok(())
}

/// Tests exporting more than is in stock and recording a sale by hand.
///
/// Expected: Err(AppError::BadRequest) for both, stock unchanged
#[tokio::test]
async fn rejects_invalid_movements() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let admin = factory::create_admin(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .stock(2)
        .build()
        .await?;

    let service = InventoryService::new(db, &cache);

    let over = service
        .create_movement(movement(product.id, MovementKind::Export, 3, admin.id))
        .await;
    assert!(matches!(over, Err(AppError::BadRequest(_))));

    let sale = service
        .create_movement(movement(product.id, MovementKind::Sale, 1, admin.id))
        .await;
    assert!(matches!(sale, Err(AppError::BadRequest(_))));

    let missing = service
        .create_movement(movement(i32::MAX, MovementKind::Import, 1, admin.id))
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let stored = ProductRepository::new(db).find_by_id(product.id).await?.unwrap();
    assert_eq!(stored.stock, 2);

    Ok(())
}
