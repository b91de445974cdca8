use super::*;

/// Tests marking a notification read on behalf of another user.
///
/// Expected: Ok(false) and the notification stays unread
#[tokio::test]
async fn mark_read_is_scoped_to_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Notification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let notification = factory::notification::NotificationFactory::new(db, owner.id)
        .build()
        .await?;

    let repo = NotificationRepository::new(db);

    assert!(!repo.mark_read(other.id, notification.id).await?);
    assert_eq!(repo.unread_count(owner.id).await?, 1);

    assert!(repo.mark_read(owner.id, notification.id).await?);
    assert_eq!(repo.unread_count(owner.id).await?, 0);

    Ok(())
}

/// Tests marking everything read and the unread-only listing.
///
/// Expected: Ok(2) changed, then an empty unread listing
#[tokio::test]
async fn mark_all_read_counts_changed_rows() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Notification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .build()
        .await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .build()
        .await?;
    factory::notification::NotificationFactory::new(db, user.id)
        .read(true)
        .build()
        .await?;

    let repo = NotificationRepository::new(db);

    assert_eq!(repo.mark_all_read(user.id).await?, 2);

    let unread = repo.list(user.id, true, PageRequest::default()).await?;
    assert_eq!(unread.total, 0);
    let all = repo.list(user.id, false, PageRequest::default()).await?;
    assert_eq!(all.total, 3);

    Ok(())
}

/// Tests deleting another user's notification.
///
/// Expected: Ok(false)
#[tokio::test]
async fn delete_is_scoped_to_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Notification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let notification = factory::notification::NotificationFactory::new(db, owner.id)
        .build()
        .await?;

    let repo = NotificationRepository::new(db);

    assert!(!repo.delete(other.id, notification.id).await?);
    assert!(repo.delete(owner.id, notification.id).await?);

    Ok(())
}
