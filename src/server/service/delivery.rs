//! Shipments for confirmed orders.
//!
//! Creating a delivery and the `delivered` / `returned` events also move the order
//! through its own status machine, in the same transaction as the delivery write.

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{delivery::DeliveryStatus, order::OrderStatus},
    server::{
        cache::ResponseCache,
        data::{delivery::DeliveryRepository, order::OrderRepository},
        error::AppError,
        model::{
            delivery::{AddDeliveryEventParam, CreateDeliveryParam, Delivery, DeliveryFilter},
            order::Order,
            pagination::{PageRequest, Paginated},
        },
        service::order::apply_transition,
    },
};

pub struct DeliveryService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> DeliveryService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    /// Creates the delivery for a confirmed order and moves the order to `shipping`.
    ///
    /// # Returns
    /// - `Ok(Delivery)` - The `pending` delivery with its initial event
    /// - `Err(AppError::NotFound)` - Unknown order
    /// - `Err(AppError::BadRequest)` - Missing carrier/tracking code or order not confirmed
    /// - `Err(AppError::Conflict)` - The order already has a delivery
    pub async fn create(&self, param: CreateDeliveryParam) -> Result<Delivery, AppError> {
        if param.carrier.is_empty() || param.tracking_code.is_empty() {
            return Err(AppError::BadRequest(
                "Carrier and tracking code are required".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let order = OrderRepository::new(&txn)
            .find_by_id(param.order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))?;
        if order.status != OrderStatus::Confirmed {
            return Err(AppError::BadRequest(format!(
                "Order must be confirmed to ship, it is {}",
                order.status
            )));
        }

        let repo = DeliveryRepository::new(&txn);
        if repo.exists_for_order(order.id).await? {
            return Err(AppError::Conflict(
                "Order already has a delivery".to_string(),
            ));
        }

        let delivery = repo.create(param).await?;
        apply_transition(&txn, &order, OrderStatus::Shipping, None).await?;

        txn.commit().await?;

        tracing::info!(
            delivery_id = delivery.id,
            order_id = order.id,
            carrier = %delivery.carrier,
            "Created delivery"
        );

        Ok(delivery)
    }

    /// Appends a tracking event, moving the delivery (and for terminal events the
    /// order) forward.
    ///
    /// # Returns
    /// - `Ok(Delivery)` - The delivery with all events
    /// - `Err(AppError::NotFound)` - Unknown delivery
    /// - `Err(AppError::BadRequest)` - The delivery cannot move to the event's status
    pub async fn add_event(
        &self,
        id: i32,
        param: AddDeliveryEventParam,
    ) -> Result<Delivery, AppError> {
        let txn = self.db.begin().await?;
        let repo = DeliveryRepository::new(&txn);

        let delivery = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Delivery"))?;

        let status = param.status;
        if !delivery.status.can_transition_to(status) {
            return Err(AppError::BadRequest(format!(
                "Cannot change delivery status from {} to {}",
                delivery.status, status
            )));
        }

        let updated = repo
            .append_event(id, param, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("Delivery"))?;

        let order_status = match status {
            DeliveryStatus::Delivered => Some(OrderStatus::Delivered),
            DeliveryStatus::Returned => Some(OrderStatus::Returned),
            _ => None,
        };

        let mut restocked: Option<Order> = None;
        if let Some(order_status) = order_status {
            let order = OrderRepository::new(&txn)
                .find_by_id(delivery.order_id)
                .await?
                .ok_or_else(|| AppError::not_found("Order"))?;
            apply_transition(&txn, &order, order_status, None).await?;
            if order_status.releases_stock() {
                restocked = Some(order);
            }
        }

        txn.commit().await?;

        if let Some(order) = restocked {
            for item in &order.items {
                self.cache.invalidate_product(item.product_id).await;
            }
        }

        tracing::info!(
            delivery_id = id,
            from = %delivery.status,
            to = %status,
            "Delivery status changed"
        );

        Ok(updated)
    }

    pub async fn list(
        &self,
        filter: DeliveryFilter,
        page: PageRequest,
    ) -> Result<Paginated<Delivery>, AppError> {
        DeliveryRepository::new(self.db).list(filter, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Delivery, AppError> {
        DeliveryRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Delivery"))
    }

    /// Tracking for an order, visible to its owner or an admin.
    ///
    /// # Returns
    /// - `Ok(Delivery)` - The delivery with events oldest first
    /// - `Err(AppError::NotFound)` - Unknown order, someone else's order, or not shipped yet
    pub async fn tracking(
        &self,
        user_id: i32,
        is_admin: bool,
        order_id: i32,
    ) -> Result<Delivery, AppError> {
        let order = OrderRepository::new(self.db)
            .find_by_id(order_id)
            .await?
            .filter(|order| is_admin || order.user_id == user_id)
            .ok_or_else(|| AppError::not_found("Order"))?;

        DeliveryRepository::new(self.db)
            .find_by_order(order.id)
            .await?
            .ok_or_else(|| AppError::not_found("Delivery"))
    }
}
