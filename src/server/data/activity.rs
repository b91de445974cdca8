//! Activity (event) repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::activity::ActivityStatus,
    server::{
        error::AppError,
        model::{
            activity::{Activity, ActivityFields},
            pagination::{PageRequest, Paginated},
        },
    },
};

pub struct ActivityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ActivityRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, fields: ActivityFields) -> Result<Activity, AppError> {
        let now = Utc::now();
        let entity = entity::activity::ActiveModel {
            title: ActiveValue::Set(fields.title),
            description: ActiveValue::Set(fields.description),
            location: ActiveValue::Set(fields.location),
            image_url: ActiveValue::Set(fields.image_url),
            start_at: ActiveValue::Set(fields.start_at),
            end_at: ActiveValue::Set(fields.end_at),
            active: ActiveValue::Set(fields.active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Activity::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Activity>, AppError> {
        let entity = entity::prelude::Activity::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Activity::from_entity))
    }

    pub async fn update(
        &self,
        id: i32,
        fields: ActivityFields,
    ) -> Result<Option<Activity>, AppError> {
        let Some(entity) = entity::prelude::Activity::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::activity::ActiveModel = entity.into();
        active.title = ActiveValue::Set(fields.title);
        active.description = ActiveValue::Set(fields.description);
        active.location = ActiveValue::Set(fields.location);
        active.image_url = ActiveValue::Set(fields.image_url);
        active.start_at = ActiveValue::Set(fields.start_at);
        active.end_at = ActiveValue::Set(fields.end_at);
        active.active = ActiveValue::Set(fields.active);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Activity::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Activity::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists activities by start time.
    ///
    /// # Arguments
    /// - `status` - Derived status to match at `now`
    /// - `include_disabled` - Admin listings also show inactive activities
    pub async fn list(
        &self,
        status: Option<ActivityStatus>,
        include_disabled: bool,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<Paginated<Activity>, AppError> {
        let mut query = entity::prelude::Activity::find();
        if !include_disabled {
            query = query.filter(entity::activity::Column::Active.eq(true));
        }
        if let Some(status) = status {
            query = query.filter(status_condition(status, now));
        }

        let paginator = query
            .order_by_asc(entity::activity::Column::StartAt)
            .order_by_asc(entity::activity::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let activities = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Activity::from_entity)
            .collect();

        Ok(Paginated::new(activities, page, total))
    }

    /// Active activities that have not ended yet, soonest first.
    pub async fn current_and_upcoming(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Activity>, AppError> {
        let entities = entity::prelude::Activity::find()
            .filter(entity::activity::Column::Active.eq(true))
            .filter(entity::activity::Column::EndAt.gte(now))
            .order_by_asc(entity::activity::Column::StartAt)
            .order_by_asc(entity::activity::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Activity::from_entity).collect())
    }
}

fn status_condition(status: ActivityStatus, now: DateTime<Utc>) -> Condition {
    use entity::activity::Column;

    match status {
        ActivityStatus::Disabled => Condition::all().add(Column::Active.eq(false)),
        ActivityStatus::Upcoming => Condition::all()
            .add(Column::Active.eq(true))
            .add(Column::StartAt.gt(now)),
        ActivityStatus::Ended => Condition::all()
            .add(Column::Active.eq(true))
            .add(Column::StartAt.lte(now))
            .add(Column::EndAt.lt(now)),
        ActivityStatus::Ongoing => Condition::all()
            .add(Column::Active.eq(true))
            .add(Column::StartAt.lte(now))
            .add(Column::EndAt.gte(now)),
    }
}
