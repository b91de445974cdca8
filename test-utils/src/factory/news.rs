//! News article factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct NewsFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    slug: String,
    published_at: Option<DateTime<Utc>>,
}

impl<'a> NewsFactory<'a> {
    /// Defaults to an unpublished article.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("News {}", id),
            slug: format!("news-{}", id),
            published_at: None,
        }
    }

    pub fn published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub async fn build(self) -> Result<entity::news::Model, DbErr> {
        let now = Utc::now();
        entity::news::ActiveModel {
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            summary: ActiveValue::Set(None),
            content: ActiveValue::Set("# Heading\n\nBody text.".to_string()),
            cover_image_url: ActiveValue::Set(None),
            published: ActiveValue::Set(self.published_at.is_some()),
            published_at: ActiveValue::Set(self.published_at),
            author_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
