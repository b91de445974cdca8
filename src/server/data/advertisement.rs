//! Advertisement repository, including the click and impression counters.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::advertisement::AdPosition,
    server::{
        error::AppError,
        model::{
            advertisement::{AdFilter, Advertisement, AdvertisementFields},
            pagination::{PageRequest, Paginated},
        },
    },
};

pub struct AdvertisementRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AdvertisementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, fields: AdvertisementFields) -> Result<Advertisement, AppError> {
        let now = Utc::now();
        let entity = entity::advertisement::ActiveModel {
            title: ActiveValue::Set(fields.title),
            image_url: ActiveValue::Set(fields.image_url),
            link_url: ActiveValue::Set(fields.link_url),
            position: ActiveValue::Set(fields.position.to_string()),
            sort_order: ActiveValue::Set(fields.sort_order),
            start_at: ActiveValue::Set(fields.start_at),
            end_at: ActiveValue::Set(fields.end_at),
            active: ActiveValue::Set(fields.active),
            clicks: ActiveValue::Set(0),
            impressions: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Advertisement::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Advertisement>, AppError> {
        entity::prelude::Advertisement::find_by_id(id)
            .one(self.db)
            .await?
            .map(Advertisement::from_entity)
            .transpose()
    }

    pub async fn update(
        &self,
        id: i32,
        fields: AdvertisementFields,
    ) -> Result<Option<Advertisement>, AppError> {
        let Some(entity) = entity::prelude::Advertisement::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::advertisement::ActiveModel = entity.into();
        active.title = ActiveValue::Set(fields.title);
        active.image_url = ActiveValue::Set(fields.image_url);
        active.link_url = ActiveValue::Set(fields.link_url);
        active.position = ActiveValue::Set(fields.position.to_string());
        active.sort_order = ActiveValue::Set(fields.sort_order);
        active.start_at = ActiveValue::Set(fields.start_at);
        active.end_at = ActiveValue::Set(fields.end_at);
        active.active = ActiveValue::Set(fields.active);
        active.updated_at = ActiveValue::Set(Utc::now());

        Advertisement::from_entity(active.update(self.db).await?).map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Advertisement::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Admin listing ordered by position, then display order.
    pub async fn list(
        &self,
        filter: AdFilter,
        page: PageRequest,
    ) -> Result<Paginated<Advertisement>, AppError> {
        let mut query = entity::prelude::Advertisement::find();
        if let Some(position) = filter.position {
            query = query.filter(entity::advertisement::Column::Position.eq(position.as_str()));
        }
        if let Some(active) = filter.active {
            query = query.filter(entity::advertisement::Column::Active.eq(active));
        }

        let paginator = query
            .order_by_asc(entity::advertisement::Column::Position)
            .order_by_asc(entity::advertisement::Column::SortOrder)
            .order_by_asc(entity::advertisement::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let ads = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Advertisement::from_entity)
            .collect::<Result<_, _>>()?;

        Ok(Paginated::new(ads, page, total))
    }

    /// Ads running at `now`, by `sort_order` then id.
    pub async fn running(
        &self,
        position: Option<AdPosition>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Advertisement>, AppError> {
        use entity::advertisement::Column;

        let mut query = entity::prelude::Advertisement::find()
            .filter(Column::Active.eq(true))
            .filter(
                Condition::any()
                    .add(Column::StartAt.is_null())
                    .add(Column::StartAt.lte(now)),
            )
            .filter(
                Condition::any()
                    .add(Column::EndAt.is_null())
                    .add(Column::EndAt.gte(now)),
            );
        if let Some(position) = position {
            query = query.filter(Column::Position.eq(position.as_str()));
        }

        query
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Advertisement::from_entity)
            .collect()
    }

    pub async fn record_impressions(&self, ids: &[i32]) -> Result<(), AppError> {
        if ids.is_empty() {
            return Ok(());
        }

        entity::prelude::Advertisement::update_many()
            .filter(entity::advertisement::Column::Id.is_in(ids.iter().copied()))
            .col_expr(
                entity::advertisement::Column::Impressions,
                Expr::cust("impressions + 1"),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn record_click(&self, id: i32) -> Result<(), AppError> {
        entity::prelude::Advertisement::update_many()
            .filter(entity::advertisement::Column::Id.eq(id))
            .col_expr(
                entity::advertisement::Column::Clicks,
                Expr::cust("clicks + 1"),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }
}
