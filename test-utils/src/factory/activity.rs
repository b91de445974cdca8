//! Activity factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ActivityFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    active: bool,
}

impl<'a> ActivityFactory<'a> {
    /// Defaults to an ongoing activity (started an hour ago, ends tomorrow).
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let now = Utc::now();
        Self {
            db,
            title: format!("Activity {}", next_id()),
            start_at: now - Duration::hours(1),
            end_at: now + Duration::days(1),
            active: true,
        }
    }

    pub fn window(mut self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        self.start_at = start_at;
        self.end_at = end_at;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub async fn build(self) -> Result<entity::activity::Model, DbErr> {
        let now = Utc::now();
        entity::activity::ActiveModel {
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(None),
            location: ActiveValue::Set(None),
            image_url: ActiveValue::Set(None),
            start_at: ActiveValue::Set(self.start_at),
            end_at: ActiveValue::Set(self.end_at),
            active: ActiveValue::Set(self.active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
