use super::*;

/// Tests that the search term matches name or email.
///
/// Expected: Ok with only the matching user
#[tokio::test]
async fn filters_by_search_term() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .name("Minh Nguyen")
        .build()
        .await?;
    factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let page = repo
        .list(
            UserFilter {
                search: Some("Minh".to_string()),
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Minh Nguyen");

    Ok(())
}

/// Tests pagination totals across pages.
///
/// Expected: Ok with 2 items on page 2 of 5 users at limit 3
#[tokio::test]
async fn paginates_users() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::create_user(db).await?;
    }

    let repo = UserRepository::new(db);
    let page = repo
        .list(UserFilter::default(), PageRequest::new(Some(2), Some(3)))
        .await?;

    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_pages(), 2);

    Ok(())
}

/// Tests that customer counting ignores admins.
///
/// Expected: Ok(2)
#[tokio::test]
async fn counts_customers_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    factory::create_user(db).await?;
    factory::create_admin(db).await?;

    let count = UserRepository::new(db).count_customers().await?;

    assert_eq!(count, 2);

    Ok(())
}
