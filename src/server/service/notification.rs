use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::{
    model::notification::NotificationKind,
    server::{
        data::{notification::NotificationRepository, user::UserRepository},
        error::AppError,
        model::{
            notification::{Notification, NotificationContent, SendNotificationParam},
            pagination::{PageRequest, Paginated},
        },
    },
};

/// Creates a notification for `user_id` on `db`, which may be an open transaction.
pub async fn notify<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    kind: NotificationKind,
    title: impl Into<String>,
    message: impl Into<String>,
    link: Option<String>,
) -> Result<(), AppError> {
    NotificationRepository::new(db)
        .create(
            user_id,
            NotificationContent {
                kind,
                title: title.into(),
                message: message.into(),
                link,
            },
        )
        .await?;

    Ok(())
}

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        user_id: i32,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Paginated<Notification>, AppError> {
        NotificationRepository::new(self.db)
            .list(user_id, unread_only, page)
            .await
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        NotificationRepository::new(self.db)
            .unread_count(user_id)
            .await
    }

    /// Marks one of the user's notifications read; another user's id is a 404.
    pub async fn mark_read(&self, user_id: i32, id: i32) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db)
            .mark_read(user_id, id)
            .await?
        {
            return Err(AppError::not_found("Notification"));
        }
        Ok(())
    }

    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await
    }

    pub async fn delete(&self, user_id: i32, id: i32) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db)
            .delete(user_id, id)
            .await?
        {
            return Err(AppError::not_found("Notification"));
        }
        Ok(())
    }

    /// Sends to one user, or broadcasts to every active user when `user_id` is absent.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications created
    /// - `Err(AppError::BadRequest)` - Empty title or message
    /// - `Err(AppError::NotFound)` - Target user does not exist
    pub async fn send(&self, param: SendNotificationParam) -> Result<u64, AppError> {
        if param.content.title.is_empty() || param.content.message.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Title and message are required".to_string(),
            ));
        }

        let user_repo = UserRepository::new(self.db);
        let repo = NotificationRepository::new(self.db);

        let created = match param.user_id {
            Some(user_id) => {
                if user_repo.find_by_id(user_id).await?.is_none() {
                    return Err(AppError::not_found("User"));
                }
                repo.create(user_id, param.content).await?;
                1
            }
            None => {
                let recipients = user_repo.active_ids().await?;
                repo.create_many(&recipients, param.content).await?
            }
        };

        tracing::info!(created, "Sent admin notification");

        Ok(created)
    }
}
