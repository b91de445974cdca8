//! Voucher factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test vouchers.
///
/// Defaults to a running 10% voucher (started a day ago, ending in a week) with no
/// cap, no minimum, no total limit and one use per customer.
pub struct VoucherFactory<'a> {
    db: &'a DatabaseConnection,
    code: String,
    discount_type: String,
    discount_value: i64,
    max_discount: Option<i64>,
    min_order_value: i64,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    usage_limit: Option<i32>,
    used_count: i32,
    per_user_limit: i32,
    active: bool,
}

impl<'a> VoucherFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let now = Utc::now();
        Self {
            db,
            code: format!("SAVE{}", next_id()),
            discount_type: "percent".to_string(),
            discount_value: 10,
            max_discount: None,
            min_order_value: 0,
            start_at: now - Duration::days(1),
            end_at: now + Duration::days(7),
            usage_limit: None,
            used_count: 0,
            per_user_limit: 1,
            active: true,
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets a fixed-amount discount.
    pub fn fixed(mut self, value: i64) -> Self {
        self.discount_type = "fixed".to_string();
        self.discount_value = value;
        self
    }

    /// Sets a percentage discount.
    pub fn percent(mut self, value: i64) -> Self {
        self.discount_type = "percent".to_string();
        self.discount_value = value;
        self
    }

    pub fn max_discount(mut self, max_discount: i64) -> Self {
        self.max_discount = Some(max_discount);
        self
    }

    pub fn min_order_value(mut self, min_order_value: i64) -> Self {
        self.min_order_value = min_order_value;
        self
    }

    pub fn window(mut self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        self.start_at = start_at;
        self.end_at = end_at;
        self
    }

    pub fn usage_limit(mut self, usage_limit: i32) -> Self {
        self.usage_limit = Some(usage_limit);
        self
    }

    pub fn used_count(mut self, used_count: i32) -> Self {
        self.used_count = used_count;
        self
    }

    pub fn per_user_limit(mut self, per_user_limit: i32) -> Self {
        self.per_user_limit = per_user_limit;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub async fn build(self) -> Result<entity::voucher::Model, DbErr> {
        let now = Utc::now();
        entity::voucher::ActiveModel {
            code: ActiveValue::Set(self.code),
            description: ActiveValue::Set(None),
            discount_type: ActiveValue::Set(self.discount_type),
            discount_value: ActiveValue::Set(self.discount_value),
            max_discount: ActiveValue::Set(self.max_discount),
            min_order_value: ActiveValue::Set(self.min_order_value),
            start_at: ActiveValue::Set(self.start_at),
            end_at: ActiveValue::Set(self.end_at),
            usage_limit: ActiveValue::Set(self.usage_limit),
            used_count: ActiveValue::Set(self.used_count),
            per_user_limit: ActiveValue::Set(self.per_user_limit),
            active: ActiveValue::Set(self.active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_voucher(db: &DatabaseConnection) -> Result<entity::voucher::Model, DbErr> {
    VoucherFactory::new(db).build().await
}
