use super::*;

/// Tests the lookups used to keep the category tree valid.
///
/// Expected: the child reports its parent and the parent counts one child
#[tokio::test]
async fn reports_parent_and_children() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::create_category(db).await?;
    let child = factory::category::CategoryFactory::new(db)
        .parent_id(root.id)
        .build()
        .await?;

    let repo = CategoryRepository::new(db);

    assert_eq!(repo.parent_of(child.id).await?, Some(root.id));
    assert_eq!(repo.parent_of(root.id).await?, None);
    assert_eq!(repo.count_children(root.id).await?, 1);
    assert_eq!(repo.count_children(child.id).await?, 0);

    Ok(())
}

/// Tests name and slug uniqueness checks.
///
/// Expected: taken for other rows, free when excluding the row itself
#[tokio::test]
async fn detects_taken_name_and_slug() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let category = factory::create_category(db).await?;

    let repo = CategoryRepository::new(db);

    assert!(repo.name_taken(&category.name, None).await?);
    assert!(!repo.name_taken(&category.name, Some(category.id)).await?);
    assert!(repo.slug_taken(&category.slug).await?);
    assert!(!repo.slug_taken("unused-slug").await?);

    Ok(())
}

/// Tests that `find_by_ids` skips unknown ids.
///
/// Expected: Ok with the two existing categories
#[tokio::test]
async fn finds_existing_ids_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_category(db).await?;
    let second = factory::create_category(db).await?;

    let mut ids: Vec<i32> = CategoryRepository::new(db)
        .find_by_ids(&[second.id, 999, first.id])
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();
    ids.sort_unstable();

    assert_eq!(ids, vec![first.id, second.id]);

    Ok(())
}
