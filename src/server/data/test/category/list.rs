use super::*;

/// Tests listing the children of one parent.
///
/// Expected: Ok with only the two children
#[tokio::test]
async fn filters_by_parent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(Category).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::create_category(db).await?;
    for _ in 0..2 {
        factory::category::CategoryFactory::new(db)
            .parent_id(root.id)
            .build()
            .await?;
    }

    let page = CategoryRepository::new(db)
        .list(
            CategoryFilter {
                parent_id: Some(root.id),
                search: None,
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|c| c.parent_id == Some(root.id)));

    Ok(())
}
