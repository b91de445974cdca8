use super::*;

/// Tests that price filters and sorting use the sale price when one is set.
///
/// Expected: Ok with the discounted product first and the expensive one excluded
#[tokio::test]
async fn filters_and_sorts_by_effective_price() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let discounted = factory::product::ProductFactory::new(db)
        .price(500_000)
        .sale_price(Some(90_000))
        .build()
        .await?;
    let regular = factory::product::ProductFactory::new(db)
        .price(150_000)
        .build()
        .await?;
    factory::product::ProductFactory::new(db)
        .price(400_000)
        .build()
        .await?;

    let page = ProductRepository::new(db)
        .list(
            ProductFilter {
                max_price: Some(200_000),
                sort: ProductSort::PriceAsc,
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;

    let ids: Vec<i32> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![discounted.id, regular.id]);

    Ok(())
}

/// Tests filtering by brand and active flag.
///
/// Expected: Ok with the single active product of the brand
#[tokio::test]
async fn filters_by_brand_and_active() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let brand = factory::create_brand(db).await?;
    let listed = factory::product::ProductFactory::new(db)
        .brand_id(brand.id)
        .build()
        .await?;
    factory::product::ProductFactory::new(db)
        .brand_id(brand.id)
        .active(false)
        .build()
        .await?;
    factory::create_product(db).await?;

    let page = ProductRepository::new(db)
        .list(
            ProductFilter {
                brand_id: Some(brand.id),
                active: Some(true),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, listed.id);

    Ok(())
}

/// Tests search over name and SKU.
///
/// Expected: Ok with the product whose name matches
#[tokio::test]
async fn searches_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::product::ProductFactory::new(db)
        .name("Linen Shirt")
        .build()
        .await?;
    factory::create_product(db).await?;

    let page = ProductRepository::new(db)
        .list(
            ProductFilter {
                search: Some("Linen".to_string()),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Linen Shirt");

    Ok(())
}
