//! Notification repository. Every query is scoped to the recipient.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        notification::{Notification, NotificationContent},
        pagination::{PageRequest, Paginated},
    },
};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        content: NotificationContent,
    ) -> Result<Notification, AppError> {
        let entity = entity::notification::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            kind: ActiveValue::Set(content.kind.to_string()),
            title: ActiveValue::Set(content.title),
            message: ActiveValue::Set(content.message),
            link: ActiveValue::Set(content.link),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Notification::from_entity(entity)
    }

    /// Sends the same notification to every user in `user_ids`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications created
    pub async fn create_many(
        &self,
        user_ids: &[i32],
        content: NotificationContent,
    ) -> Result<u64, AppError> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let models = user_ids.iter().map(|user_id| entity::notification::ActiveModel {
            user_id: ActiveValue::Set(*user_id),
            kind: ActiveValue::Set(content.kind.to_string()),
            title: ActiveValue::Set(content.title.clone()),
            message: ActiveValue::Set(content.message.clone()),
            link: ActiveValue::Set(content.link.clone()),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        });

        entity::prelude::Notification::insert_many(models)
            .exec_without_returning(self.db)
            .await?;

        Ok(user_ids.len() as u64)
    }

    /// Lists a user's notifications newest first.
    pub async fn list(
        &self,
        user_id: i32,
        unread_only: bool,
        page: PageRequest,
    ) -> Result<Paginated<Notification>, AppError> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id));
        if unread_only {
            query = query.filter(entity::notification::Column::Read.eq(false));
        }

        let paginator = query
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let notifications = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Notification::from_entity)
            .collect::<Result<_, _>>()?;

        Ok(Paginated::new(notifications, page, total))
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        let count = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Marks one notification read; `false` when it does not belong to the user.
    pub async fn mark_read(&self, user_id: i32, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .col_expr(entity::notification::Column::Read, Expr::value(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks every unread notification of the user read and returns how many changed.
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        let result = entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .col_expr(entity::notification::Column::Read, Expr::value(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, user_id: i32, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
