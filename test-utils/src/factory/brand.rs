//! Brand factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct BrandFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    slug: String,
}

impl<'a> BrandFactory<'a> {
    /// Defaults: name `"Brand {id}"`, slug `"brand-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Brand {}", id),
            slug: format!("brand-{}", id),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub async fn build(self) -> Result<entity::brand::Model, DbErr> {
        let now = Utc::now();
        entity::brand::ActiveModel {
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set(None),
            logo_url: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_brand(db: &DatabaseConnection) -> Result<entity::brand::Model, DbErr> {
    BrandFactory::new(db).build().await
}
