//! Homepage singleton repository.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait};

use crate::server::{
    error::{internal::InternalError, AppError},
    model::homepage::{HomepageConfig, UpdateHomepageParam, HOMEPAGE_ID},
};

pub struct HomepageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> HomepageRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// The saved configuration, or `None` if the homepage was never saved.
    pub async fn get(&self) -> Result<Option<HomepageConfig>, AppError> {
        entity::prelude::Homepage::find_by_id(HOMEPAGE_ID)
            .one(self.db)
            .await?
            .map(HomepageConfig::from_entity)
            .transpose()
    }

    /// Creates or replaces the singleton row.
    pub async fn upsert(&self, param: UpdateHomepageParam) -> Result<HomepageConfig, AppError> {
        let now = Utc::now();
        let product_ids =
            serde_json::to_value(&param.featured_product_ids).map_err(InternalError::from)?;
        let category_ids =
            serde_json::to_value(&param.featured_category_ids).map_err(InternalError::from)?;

        let existing = entity::prelude::Homepage::find_by_id(HOMEPAGE_ID)
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(entity) => {
                let mut active: entity::homepage::ActiveModel = entity.into();
                active.hero_title = ActiveValue::Set(param.hero_title);
                active.hero_subtitle = ActiveValue::Set(param.hero_subtitle);
                active.hero_image_url = ActiveValue::Set(param.hero_image_url);
                active.featured_product_ids = ActiveValue::Set(product_ids);
                active.featured_category_ids = ActiveValue::Set(category_ids);
                active.updated_at = ActiveValue::Set(now);
                active.update(self.db).await?
            }
            None => {
                entity::homepage::ActiveModel {
                    id: ActiveValue::Set(HOMEPAGE_ID),
                    hero_title: ActiveValue::Set(param.hero_title),
                    hero_subtitle: ActiveValue::Set(param.hero_subtitle),
                    hero_image_url: ActiveValue::Set(param.hero_image_url),
                    featured_product_ids: ActiveValue::Set(product_ids),
                    featured_category_ids: ActiveValue::Set(category_ids),
                    updated_at: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await?
            }
        };

        HomepageConfig::from_entity(entity)
    }
}
