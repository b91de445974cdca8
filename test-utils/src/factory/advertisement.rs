//! Advertisement factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct AdvertisementFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    position: String,
    sort_order: i32,
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
    active: bool,
}

impl<'a> AdvertisementFactory<'a> {
    /// Defaults to an unscheduled, active `home_banner` ad.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            title: format!("Ad {}", next_id()),
            position: "home_banner".to_string(),
            sort_order: 0,
            start_at: None,
            end_at: None,
            active: true,
        }
    }

    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn window(mut self, start_at: Option<DateTime<Utc>>, end_at: Option<DateTime<Utc>>) -> Self {
        self.start_at = start_at;
        self.end_at = end_at;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub async fn build(self) -> Result<entity::advertisement::Model, DbErr> {
        let now = Utc::now();
        entity::advertisement::ActiveModel {
            title: ActiveValue::Set(self.title),
            image_url: ActiveValue::Set("https://cdn.example.com/ad.png".to_string()),
            link_url: ActiveValue::Set(Some("https://example.com/sale".to_string())),
            position: ActiveValue::Set(self.position),
            sort_order: ActiveValue::Set(self.sort_order),
            start_at: ActiveValue::Set(self.start_at),
            end_at: ActiveValue::Set(self.end_at),
            active: ActiveValue::Set(self.active),
            clicks: ActiveValue::Set(0),
            impressions: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
