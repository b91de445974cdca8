use super::test_cache;
use crate::server::{
    error::AppError,
    model::category::{CreateCategoryParam, UpdateCategoryParam},
    service::category::CategoryService,
};
use test_utils::{builder::TestBuilder, factory};

/// Tests moving a category under itself and under its own grandchild.
///
/// Expected: Err(AppError::BadRequest) for both moves
#[tokio::test]
async fn rejects_parent_cycles() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let root = factory::create_category(db).await?;
    let child = factory::category::CategoryFactory::new(db)
        .parent_id(root.id)
        .build()
        .await?;
    let grandchild = factory::category::CategoryFactory::new(db)
        .parent_id(child.id)
        .build()
        .await?;

    let service = CategoryService::new(db, &cache);

    let onto_self = service
        .update(
            root.id,
            UpdateCategoryParam {
                parent_id: Some(root.id),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(onto_self, Err(AppError::BadRequest(_))));

    let under_descendant = service
        .update(
            root.id,
            UpdateCategoryParam {
                parent_id: Some(grandchild.id),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(under_descendant, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests creating a category with a generated slug and a taken name.
///
/// Expected: Ok with a slug derived from the name, then Err(AppError::Conflict)
#[tokio::test]
async fn create_derives_slug_and_rejects_duplicates() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let service = CategoryService::new(db, &cache);
    let param = CreateCategoryParam {
        name: "Running Shoes".to_string(),
        slug: None,
        description: None,
        parent_id: None,
    };

    let category = service.create(param.clone()).await?;
    assert_eq!(category.slug, "running-shoes");

    let duplicate = service.create(param).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests deleting a category that still has children or products.
///
/// Expected: Err(AppError::Conflict) for both, Ok once the category is empty
#[tokio::test]
async fn delete_requires_empty_category() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache();

    let parent = factory::create_category(db).await?;
    factory::category::CategoryFactory::new(db)
        .parent_id(parent.id)
        .build()
        .await?;
    let stocked = factory::create_category(db).await?;
    factory::product::ProductFactory::new(db)
        .category_id(stocked.id)
        .build()
        .await?;
    let empty = factory::create_category(db).await?;

    let service = CategoryService::new(db, &cache);

    let with_children = service.delete(parent.id).await;
    assert!(matches!(with_children, Err(AppError::Conflict(_))));

    let with_products = service.delete(stocked.id).await;
    assert!(matches!(with_products, Err(AppError::Conflict(_))));

    service.delete(empty.id).await?;
    let gone = service.get(empty.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));

    Ok(())
}
