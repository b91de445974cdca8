use super::*;

/// Tests broadcasting one notification to several users.
///
/// Expected: Ok(2) and one unread notification per recipient
#[tokio::test]
async fn creates_one_row_per_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Notification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    let created = repo
        .create_many(
            &[first.id, second.id],
            NotificationContent {
                kind: NotificationKind::Promotion,
                title: "Weekend sale".to_string(),
                message: "Everything 20% off".to_string(),
                link: None,
            },
        )
        .await?;

    assert_eq!(created, 2);
    assert_eq!(repo.unread_count(first.id).await?, 1);
    assert_eq!(repo.unread_count(second.id).await?, 1);

    let page = repo.list(first.id, false, PageRequest::default()).await?;
    assert_eq!(page.items[0].kind, NotificationKind::Promotion);

    Ok(())
}

/// Tests broadcasting to nobody.
///
/// Expected: Ok(0) without touching the database
#[tokio::test]
async fn empty_recipient_list_creates_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Notification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = NotificationRepository::new(db)
        .create_many(
            &[],
            NotificationContent {
                kind: NotificationKind::System,
                title: "Maintenance".to_string(),
                message: "Tonight".to_string(),
                link: None,
            },
        )
        .await?;

    assert_eq!(created, 0);

    Ok(())
}
