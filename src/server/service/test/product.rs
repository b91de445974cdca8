use super::test_cache;
use crate::server::{
    error::AppError,
    model::product::{CreateProductParam, UpdateProductParam},
    service::product::ProductService,
};
use test_utils::{builder::TestBuilder, factory};

fn product(name: &str, sku: &str) -> CreateProductParam {
    CreateProductParam {
        name: name.to_string(),
        slug: None,
        sku: sku.to_string(),
        description: None,
        price: 150_000,
        sale_price: None,
        stock: 8,
        brand_id: None,
        category_id: None,
        image_url: None,
        active: true,
    }
}

/// Tests creating products whose names derive the same slug.
///
/// Expected: Ok with `trail-runner`, then `trail-runner-2`
#[tokio::test]
async fn create_uniquifies_slug() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let service = ProductService::new(db, &cache);

    let first = service.create(product("Trail Runner", "TR-1")).await?;
    let second = service.create(product("Trail  Runner!", "TR-2")).await?;

    assert_eq!(first.slug, "trail-runner");
    assert_eq!(second.slug, "trail-runner-2");
    assert_eq!(first.stock, 8);

    Ok(())
}

/// Tests names with accents or no Latin letters at all.
///
/// Expected: Ok with transliterated slugs, falling back to `product` when nothing
/// survives
#[tokio::test]
async fn create_derives_slug_from_non_latin_names() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let service = ProductService::new(db, &cache);

    let accented = service.create(product("Bánh mì", "BM-1")).await?;
    assert_eq!(accented.slug, "banh-mi");

    let cjk = service.create(product("商品", "CJK-1")).await?;
    assert!(!cjk.slug.is_empty());
    assert!(cjk.slug.is_ascii());

    let symbols = service.create(product("???", "SYM-1")).await?;
    assert_eq!(symbols.slug, "product");

    Ok(())
}

/// Tests creating products that reference a missing brand or category, or reuse a SKU.
///
/// Expected: Err(AppError::BadRequest) for the references, Err(AppError::Conflict) for
/// the SKU
#[tokio::test]
async fn create_validates_references_and_sku() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let service = ProductService::new(db, &cache);

    let unknown_brand = service
        .create(CreateProductParam {
            brand_id: Some(i32::MAX),
            ..product("Headlamp", "HL-1")
        })
        .await;
    assert!(matches!(unknown_brand, Err(AppError::BadRequest(_))));

    let unknown_category = service
        .create(CreateProductParam {
            category_id: Some(i32::MAX),
            ..product("Headlamp", "HL-1")
        })
        .await;
    assert!(matches!(unknown_category, Err(AppError::BadRequest(_))));

    service.create(product("Headlamp", "HL-1")).await?;
    let duplicate_sku = service.create(product("Headlamp Pro", "HL-1")).await;
    assert!(matches!(duplicate_sku, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests that updating a product leaves its stock alone.
///
/// Expected: Ok with the new price and the original stock
#[tokio::test]
async fn update_keeps_stock() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let existing = factory::product::ProductFactory::new(db)
        .stock(7)
        .build()
        .await?;

    let updated = ProductService::new(db, &cache)
        .update(
            existing.id,
            UpdateProductParam {
                price: Some(120_000),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.price, 120_000);
    assert_eq!(updated.stock, 7);

    Ok(())
}

/// Tests deleting an ordered product, then one nobody ordered.
///
/// Expected: Err(AppError::Conflict), then Ok
#[tokio::test]
async fn delete_requires_no_orders() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let customer = factory::create_user(db).await?;
    let ordered = factory::create_product(db).await?;
    factory::create_order(db, customer.id, &ordered).await?;
    let unordered = factory::create_product(db).await?;

    let service = ProductService::new(db, &cache);

    let blocked = service.delete(ordered.id).await;
    assert!(matches!(blocked, Err(AppError::Conflict(_))));

    service.delete(unordered.id).await?;
    let gone = service.get(unordered.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests the public detail of an inactive product.
///
/// Expected: Err(AppError::NotFound) by id and by slug, while the admin read succeeds
#[tokio::test]
async fn public_get_hides_inactive() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let hidden = factory::product::ProductFactory::new(db)
        .active(false)
        .build()
        .await?;
    let shown = factory::create_product(db).await?;

    let service = ProductService::new(db, &cache);

    assert!(matches!(
        service.get_public(hidden.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.get_public_by_slug(&hidden.slug).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(service.get(hidden.id).await?.id, hidden.id);
    assert_eq!(service.get_public(shown.id).await?.id, shown.id);

    Ok(())
}
