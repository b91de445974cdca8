//! Delivery and delivery event repository.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    model::delivery::DeliveryStatus,
    server::{
        error::AppError,
        model::{
            delivery::{AddDeliveryEventParam, CreateDeliveryParam, Delivery, DeliveryFilter},
            pagination::{PageRequest, Paginated},
        },
    },
};

pub struct DeliveryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DeliveryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a `pending` delivery with its first event.
    pub async fn create(&self, param: CreateDeliveryParam) -> Result<Delivery, AppError> {
        let now = Utc::now();
        let delivery = entity::delivery::ActiveModel {
            order_id: ActiveValue::Set(param.order_id),
            carrier: ActiveValue::Set(param.carrier),
            tracking_code: ActiveValue::Set(param.tracking_code),
            status: ActiveValue::Set(DeliveryStatus::Pending.to_string()),
            estimated_delivery: ActiveValue::Set(param.estimated_delivery),
            delivered_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let event = self
            .insert_event(
                delivery.id,
                AddDeliveryEventParam {
                    status: DeliveryStatus::Pending,
                    location: None,
                    description: Some("Shipment created".to_string()),
                },
            )
            .await?;

        Delivery::from_entity(delivery, vec![event])
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Delivery>, AppError> {
        let Some(entity) = entity::prelude::Delivery::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        self.with_events(vec![entity]).await.map(|mut d| d.pop())
    }

    pub async fn find_by_order(&self, order_id: i32) -> Result<Option<Delivery>, AppError> {
        let Some(entity) = entity::prelude::Delivery::find()
            .filter(entity::delivery::Column::OrderId.eq(order_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        self.with_events(vec![entity]).await.map(|mut d| d.pop())
    }

    pub async fn exists_for_order(&self, order_id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::Delivery::find()
            .filter(entity::delivery::Column::OrderId.eq(order_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Appends an event and moves the delivery to the event's status.
    ///
    /// `delivered_at` is stamped when the status is `delivered`. Transition rules are
    /// checked by the caller.
    pub async fn append_event(
        &self,
        id: i32,
        param: AddDeliveryEventParam,
        now: DateTime<Utc>,
    ) -> Result<Option<Delivery>, AppError> {
        let Some(entity) = entity::prelude::Delivery::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let status = param.status;
        self.insert_event(id, param).await?;

        let mut active: entity::delivery::ActiveModel = entity.into();
        active.status = ActiveValue::Set(status.to_string());
        if status == DeliveryStatus::Delivered {
            active.delivered_at = ActiveValue::Set(Some(now));
        }
        active.updated_at = ActiveValue::Set(now);
        let entity = active.update(self.db).await?;

        self.with_events(vec![entity]).await.map(|mut d| d.pop())
    }

    /// Lists deliveries newest first.
    pub async fn list(
        &self,
        filter: DeliveryFilter,
        page: PageRequest,
    ) -> Result<Paginated<Delivery>, AppError> {
        let mut query = entity::prelude::Delivery::find();
        if let Some(status) = filter.status {
            query = query.filter(entity::delivery::Column::Status.eq(status.as_str()));
        }
        if let Some(carrier) = filter.carrier {
            query = query.filter(entity::delivery::Column::Carrier.eq(carrier));
        }

        let paginator = query
            .order_by_desc(entity::delivery::Column::CreatedAt)
            .order_by_desc(entity::delivery::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;
        let deliveries = self.with_events(entities).await?;

        Ok(Paginated::new(deliveries, page, total))
    }

    async fn insert_event(
        &self,
        delivery_id: i32,
        param: AddDeliveryEventParam,
    ) -> Result<entity::delivery_event::Model, AppError> {
        let event = entity::delivery_event::ActiveModel {
            delivery_id: ActiveValue::Set(delivery_id),
            status: ActiveValue::Set(param.status.to_string()),
            location: ActiveValue::Set(param.location),
            description: ActiveValue::Set(param.description),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(event)
    }

    /// Attaches events (oldest first) to each delivery row.
    async fn with_events(
        &self,
        entities: Vec<entity::delivery::Model>,
    ) -> Result<Vec<Delivery>, AppError> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = entities.iter().map(|d| d.id).collect();
        let events = entity::prelude::DeliveryEvent::find()
            .filter(entity::delivery_event::Column::DeliveryId.is_in(ids))
            .order_by_asc(entity::delivery_event::Column::CreatedAt)
            .order_by_asc(entity::delivery_event::Column::Id)
            .all(self.db)
            .await?;

        let mut by_delivery: HashMap<i32, Vec<entity::delivery_event::Model>> = HashMap::new();
        for event in events {
            by_delivery.entry(event.delivery_id).or_default().push(event);
        }

        entities
            .into_iter()
            .map(|d| {
                let events = by_delivery.remove(&d.id).unwrap_or_default();
                Delivery::from_entity(d, events)
            })
            .collect()
    }
}
