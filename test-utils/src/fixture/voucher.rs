use chrono::{DateTime, Duration, Utc};

/// Builder for an unsaved voucher model.
///
/// Defaults to an active 10% voucher running from one day before `now` to seven days
/// after, with no cap, no minimum, no total limit and one use per customer.
pub struct VoucherFixture {
    model: entity::voucher::Model,
}

impl VoucherFixture {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            model: entity::voucher::Model {
                id: 1,
                code: "WELCOME10".to_string(),
                description: None,
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
                created_at: now,
                updated_at: now,
            },
        }
    }

    pub fn percent(mut self, value: i64) -> Self {
        self.model.discount_type = "percent".to_string();
        self.model.discount_value = value;
        self
    }

    pub fn fixed(mut self, value: i64) -> Self {
        self.model.discount_type = "fixed".to_string();
        self.model.discount_value = value;
        self
    }

    pub fn max_discount(mut self, max_discount: i64) -> Self {
        self.model.max_discount = Some(max_discount);
        self
    }

    pub fn min_order_value(mut self, min_order_value: i64) -> Self {
        self.model.min_order_value = min_order_value;
        self
    }

    pub fn window(mut self, start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        self.model.start_at = start_at;
        self.model.end_at = end_at;
        self
    }

    pub fn usage(mut self, used_count: i32, usage_limit: Option<i32>) -> Self {
        self.model.used_count = used_count;
        self.model.usage_limit = usage_limit;
        self
    }

    pub fn per_user_limit(mut self, per_user_limit: i32) -> Self {
        self.model.per_user_limit = per_user_limit;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.model.active = active;
        self
    }

    pub fn build(self) -> entity::voucher::Model {
        self.model
    }
}
