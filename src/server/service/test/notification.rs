use crate::{
    model::notification::NotificationKind,
    server::{
        data::notification::NotificationRepository,
        error::AppError,
        model::notification::{NotificationContent, SendNotificationParam},
        service::notification::NotificationService,
    },
};
use entity::prelude::{Notification, User};
use test_utils::{builder::TestBuilder, factory};

fn content(title: &str) -> NotificationContent {
    NotificationContent {
        kind: NotificationKind::Promotion,
        title: title.to_string(),
        message: "Everything is 20% off this weekend.".to_string(),
        link: None,
    }
}

/// Tests a broadcast with one deactivated account.
///
/// Expected: Ok(2) with only the active users notified
#[tokio::test]
async fn broadcast_reaches_active_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Notification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let inactive = factory::user::UserFactory::new(db)
        .active(false)
        .build()
        .await?;

    let created = NotificationService::new(db)
        .send(SendNotificationParam {
            user_id: None,
            content: content("Weekend sale"),
        })
        .await?;
    assert_eq!(created, 2);

    let repo = NotificationRepository::new(db);
    assert_eq!(repo.unread_count(first.id).await?, 1);
    assert_eq!(repo.unread_count(second.id).await?, 1);
    assert_eq!(repo.unread_count(inactive.id).await?, 0);

    Ok(())
}

/// Tests sending to an unknown user and sending without a title.
///
/// Expected: Err(AppError::NotFound), then Err(AppError::BadRequest)
#[tokio::test]
async fn targeted_send_validates_input() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Notification)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let service = NotificationService::new(db);

    let unknown = service
        .send(SendNotificationParam {
            user_id: Some(i32::MAX),
            content: content("Hello"),
        })
        .await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    let untitled = service
        .send(SendNotificationParam {
            user_id: Some(user.id),
            content: content(""),
        })
        .await;
    assert!(matches!(untitled, Err(AppError::BadRequest(_))));

    Ok(())
}
