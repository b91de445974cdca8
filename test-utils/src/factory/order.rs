//! Order factory.
//!
//! Inserts an order row and a single line item directly, bypassing placement rules
//! (no stock movement, no voucher usage). Use the order service when a test needs
//! the full placement flow.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct OrderFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    product: &'a entity::product::Model,
    quantity: i32,
    status: String,
    payment_status: String,
    payment_method: String,
    shipping_fee: i64,
}

impl<'a> OrderFactory<'a> {
    /// Defaults: one unit, `pending`, `unpaid`, `cod`, no shipping fee.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, product: &'a entity::product::Model) -> Self {
        Self {
            db,
            user_id,
            product,
            quantity: 1,
            status: "pending".to_string(),
            payment_status: "unpaid".to_string(),
            payment_method: "cod".to_string(),
            shipping_fee: 0,
        }
    }

    pub fn quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn payment_status(mut self, payment_status: impl Into<String>) -> Self {
        self.payment_status = payment_status.into();
        self
    }

    pub fn payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = payment_method.into();
        self
    }

    pub fn shipping_fee(mut self, shipping_fee: i64) -> Self {
        self.shipping_fee = shipping_fee;
        self
    }

    pub async fn build(self) -> Result<entity::order::Model, DbErr> {
        let now = Utc::now();
        let unit_price = self.product.sale_price.unwrap_or(self.product.price);
        let subtotal = unit_price * i64::from(self.quantity);

        let order = entity::order::ActiveModel {
            code: ActiveValue::Set(format!("ORD-TEST-{:06}", next_id())),
            user_id: ActiveValue::Set(self.user_id),
            status: ActiveValue::Set(self.status),
            payment_status: ActiveValue::Set(self.payment_status),
            payment_method: ActiveValue::Set(self.payment_method),
            subtotal: ActiveValue::Set(subtotal),
            discount: ActiveValue::Set(0),
            shipping_fee: ActiveValue::Set(self.shipping_fee),
            total: ActiveValue::Set(subtotal + self.shipping_fee),
            voucher_id: ActiveValue::Set(None),
            voucher_code: ActiveValue::Set(None),
            shipping_name: ActiveValue::Set("Test Customer".to_string()),
            shipping_phone: ActiveValue::Set("0900000000".to_string()),
            shipping_address: ActiveValue::Set("1 Test Street".to_string()),
            note: ActiveValue::Set(None),
            cancel_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        entity::order_item::ActiveModel {
            order_id: ActiveValue::Set(order.id),
            product_id: ActiveValue::Set(self.product.id),
            product_name: ActiveValue::Set(self.product.name.clone()),
            sku: ActiveValue::Set(self.product.sku.clone()),
            unit_price: ActiveValue::Set(unit_price),
            quantity: ActiveValue::Set(self.quantity),
            line_total: ActiveValue::Set(subtotal),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(order)
    }
}

/// Creates a pending single-item order for `user_id`.
pub async fn create_order(
    db: &DatabaseConnection,
    user_id: i32,
    product: &entity::product::Model,
) -> Result<entity::order::Model, DbErr> {
    OrderFactory::new(db, user_id, product).build().await
}
