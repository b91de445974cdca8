use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::activity::{ActivityStatus, UpdateActivityDto},
    server::{
        cache::ResponseCache,
        data::activity::ActivityRepository,
        error::AppError,
        model::{
            activity::{Activity, ActivityFields},
            pagination::{PageRequest, Paginated},
        },
    },
};

pub struct ActivityService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> ActivityService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    /// Lists activities by start time; public listings never include disabled ones.
    pub async fn list(
        &self,
        status: Option<ActivityStatus>,
        include_disabled: bool,
        page: PageRequest,
    ) -> Result<Paginated<Activity>, AppError> {
        ActivityRepository::new(self.db)
            .list(status, include_disabled, page, Utc::now())
            .await
    }

    pub async fn get(&self, id: i32) -> Result<Activity, AppError> {
        ActivityRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Activity"))
    }

    /// Public detail; a disabled activity is reported as missing.
    pub async fn get_public(&self, id: i32) -> Result<Activity, AppError> {
        let activity = self.get(id).await?;
        if !activity.active {
            return Err(AppError::not_found("Activity"));
        }
        Ok(activity)
    }

    pub async fn create(&self, fields: ActivityFields) -> Result<Activity, AppError> {
        fields.validate().map_err(AppError::BadRequest)?;

        let activity = ActivityRepository::new(self.db).create(fields).await?;
        self.cache.invalidate_homepage().await;

        tracing::info!(activity_id = activity.id, "Created activity");

        Ok(activity)
    }

    pub async fn update(&self, id: i32, dto: UpdateActivityDto) -> Result<Activity, AppError> {
        let current = self.get(id).await?;

        let fields = ActivityFields::merged(&current, dto);
        fields.validate().map_err(AppError::BadRequest)?;

        let activity = ActivityRepository::new(self.db)
            .update(id, fields)
            .await?
            .ok_or_else(|| AppError::not_found("Activity"))?;
        self.cache.invalidate_homepage().await;

        Ok(activity)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !ActivityRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found("Activity"));
        }
        self.cache.invalidate_homepage().await;

        Ok(())
    }
}
