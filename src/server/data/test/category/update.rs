use super::*;

/// Tests moving a category under a new parent.
///
/// Expected: Ok with the parent set and the name unchanged
#[tokio::test]
async fn sets_parent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let parent = factory::create_category(db).await?;
    let category = factory::create_category(db).await?;

    let updated = CategoryRepository::new(db)
        .update(
            category.id,
            UpdateCategoryParam {
                parent_id: Some(parent.id),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.parent_id, Some(parent.id));
    assert_eq!(updated.name, category.name);

    Ok(())
}

/// Tests deleting a category that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn delete_reports_missing_row() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = CategoryRepository::new(db).delete(42).await?;

    assert!(!deleted);

    Ok(())
}
