use super::*;

/// Tests the low stock report.
///
/// Includes active products at or below the threshold, lowest first, and skips
/// inactive products.
///
/// Expected: Ok with stock 0 then stock 5
#[tokio::test]
async fn lists_active_products_at_or_below_threshold() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let at_threshold = factory::product::ProductFactory::new(db)
        .stock(5)
        .build()
        .await?;
    let empty = factory::product::ProductFactory::new(db)
        .stock(0)
        .build()
        .await?;
    factory::product::ProductFactory::new(db)
        .stock(6)
        .build()
        .await?;
    factory::product::ProductFactory::new(db)
        .stock(1)
        .active(false)
        .build()
        .await?;

    let repo = ProductRepository::new(db);
    let page = repo.low_stock(5, PageRequest::default()).await?;

    let ids: Vec<i32> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![empty.id, at_threshold.id]);
    assert_eq!(repo.count_low_stock(5).await?, 2);

    Ok(())
}
