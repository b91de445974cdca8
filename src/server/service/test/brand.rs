use super::test_cache;
use crate::server::{
    error::AppError, model::brand::CreateBrandParam, service::brand::BrandService,
};
use test_utils::{builder::TestBuilder, factory};

fn brand(name: &str) -> CreateBrandParam {
    CreateBrandParam {
        name: name.to_string(),
        slug: None,
        description: None,
        logo_url: None,
    }
}

/// Tests creating a brand twice under the same name.
///
/// Expected: Ok with a derived slug, then Err(AppError::Conflict)
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let service = BrandService::new(db, &cache);

    let created = service.create(brand("Acme Outdoor")).await?;
    assert_eq!(created.slug, "acme-outdoor");

    let duplicate = service.create(brand("Acme Outdoor")).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests deleting a brand that still has products, then one without.
///
/// Expected: Err(AppError::Conflict), then Ok
#[tokio::test]
async fn delete_requires_no_products() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let stocked = factory::create_brand(db).await?;
    factory::product::ProductFactory::new(db)
        .brand_id(stocked.id)
        .build()
        .await?;
    let empty = factory::create_brand(db).await?;

    let service = BrandService::new(db, &cache);

    let blocked = service.delete(stocked.id).await;
    assert!(matches!(blocked, Err(AppError::Conflict(_))));

    service.delete(empty.id).await?;
    let gone = service.get(empty.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));

    Ok(())
}
