//! Voucher domain model and the discount/eligibility engine.
//!
//! All rules here are pure functions of the voucher, the caller's usage count, the order
//! subtotal and the current time, so they are evaluated identically when a customer
//! previews a code and when an order redeems it inside its transaction.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::voucher::{
    CreateVoucherDto, DiscountType, UpdateVoucherDto, VoucherDto, VoucherQuery, VoucherStatus,
    VoucherUsageDto, VoucherValidationDto,
};
use crate::server::{error::AppError, util::parse::parse_enum};

#[derive(Debug, Clone, PartialEq)]
pub struct Voucher {
    pub id: i32,
    /// Stored uppercase.
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    /// Percentage (1-100) or fixed amount in minor units, per `discount_type`.
    pub discount_value: i64,
    /// Cap applied to percentage discounts.
    pub max_discount: Option<i64>,
    pub min_order_value: i64,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    /// Total redemptions allowed across all customers.
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub per_user_limit: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Why a voucher cannot be applied. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligible {
    #[error("Voucher is {0}")]
    NotActive(VoucherStatus),

    #[error("Order subtotal must be at least {0}")]
    BelowMinimum(i64),

    #[error("Voucher usage limit reached for this account")]
    UsageLimitReached,
}

impl Voucher {
    /// Lifecycle status at `now`; the first matching rule wins.
    pub fn status(&self, now: DateTime<Utc>) -> VoucherStatus {
        if !self.active {
            VoucherStatus::Disabled
        } else if now < self.start_at {
            VoucherStatus::Upcoming
        } else if now > self.end_at {
            VoucherStatus::Expired
        } else if self
            .usage_limit
            .is_some_and(|limit| self.used_count >= limit)
        {
            VoucherStatus::Exhausted
        } else {
            VoucherStatus::Active
        }
    }

    /// Returns the first reason the voucher cannot be applied, if any.
    pub fn check_eligibility(
        &self,
        user_usage_count: u64,
        subtotal: i64,
        now: DateTime<Utc>,
    ) -> Result<(), Ineligible> {
        let status = self.status(now);
        if status != VoucherStatus::Active {
            return Err(Ineligible::NotActive(status));
        }
        if subtotal < self.min_order_value {
            return Err(Ineligible::BelowMinimum(self.min_order_value));
        }
        if user_usage_count >= self.per_user_limit.max(0) as u64 {
            return Err(Ineligible::UsageLimitReached);
        }
        Ok(())
    }

    /// Discount granted on `subtotal`, never more than the subtotal and never negative.
    pub fn compute_discount(&self, subtotal: i64) -> i64 {
        let subtotal = subtotal.max(0);

        let discount = match self.discount_type {
            DiscountType::Percent => {
                let raw = subtotal.saturating_mul(self.discount_value) / 100;
                match self.max_discount {
                    Some(cap) => raw.min(cap),
                    None => raw,
                }
            }
            DiscountType::Fixed => self.discount_value,
        };

        discount.min(subtotal).max(0)
    }

    pub fn from_entity(entity: entity::voucher::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            code: entity.code,
            description: entity.description,
            discount_type: parse_enum(&entity.discount_type)?,
            discount_value: entity.discount_value,
            max_discount: entity.max_discount,
            min_order_value: entity.min_order_value,
            start_at: entity.start_at,
            end_at: entity.end_at,
            usage_limit: entity.usage_limit,
            used_count: entity.used_count,
            per_user_limit: entity.per_user_limit,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self, now: DateTime<Utc>) -> VoucherDto {
        VoucherDto {
            status: self.status(now),
            id: self.id,
            code: self.code,
            description: self.description,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            max_discount: self.max_discount,
            min_order_value: self.min_order_value,
            start_at: self.start_at,
            end_at: self.end_at,
            usage_limit: self.usage_limit,
            used_count: self.used_count,
            per_user_limit: self.per_user_limit,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoucherUsage {
    pub id: i32,
    pub voucher_id: i32,
    pub user_id: i32,
    pub order_id: i32,
    pub discount: i64,
    pub created_at: DateTime<Utc>,
}

impl VoucherUsage {
    pub fn from_entity(entity: entity::voucher_usage::Model) -> Self {
        Self {
            id: entity.id,
            voucher_id: entity.voucher_id,
            user_id: entity.user_id,
            order_id: entity.order_id,
            discount: entity.discount,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> VoucherUsageDto {
        VoucherUsageDto {
            id: self.id,
            user_id: self.user_id,
            order_id: self.order_id,
            discount: self.discount,
            created_at: self.created_at,
        }
    }
}

/// Outcome of previewing a code against a subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherValidation {
    pub code: String,
    pub discount: i64,
    pub final_amount: i64,
    pub status: VoucherStatus,
}

impl VoucherValidation {
    pub fn into_dto(self) -> VoucherValidationDto {
        VoucherValidationDto {
            code: self.code,
            discount: self.discount,
            final_amount: self.final_amount,
            status: self.status,
        }
    }
}

/// Voucher fields after create or update, checked as a whole.
#[derive(Debug, Clone)]
pub struct VoucherFields {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub max_discount: Option<i64>,
    pub min_order_value: i64,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub usage_limit: Option<i32>,
    pub per_user_limit: i32,
    pub active: bool,
}

impl VoucherFields {
    pub fn from_dto(dto: CreateVoucherDto) -> Self {
        Self {
            code: normalize_code(&dto.code),
            description: dto.description,
            discount_type: dto.discount_type,
            discount_value: dto.discount_value,
            max_discount: dto.max_discount,
            min_order_value: dto.min_order_value,
            start_at: dto.start_at,
            end_at: dto.end_at,
            usage_limit: dto.usage_limit,
            per_user_limit: dto.per_user_limit,
            active: dto.active,
        }
    }

    /// Current fields of `voucher` with the update applied on top.
    pub fn merged(voucher: &Voucher, update: UpdateVoucherParam) -> Self {
        Self {
            code: update.code.unwrap_or_else(|| voucher.code.clone()),
            description: update.description.or_else(|| voucher.description.clone()),
            discount_type: update.discount_type.unwrap_or(voucher.discount_type),
            discount_value: update.discount_value.unwrap_or(voucher.discount_value),
            max_discount: update.max_discount.unwrap_or(voucher.max_discount),
            min_order_value: update.min_order_value.unwrap_or(voucher.min_order_value),
            start_at: update.start_at.unwrap_or(voucher.start_at),
            end_at: update.end_at.unwrap_or(voucher.end_at),
            usage_limit: update.usage_limit.unwrap_or(voucher.usage_limit),
            per_user_limit: update.per_user_limit.unwrap_or(voucher.per_user_limit),
            active: update.active.unwrap_or(voucher.active),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.code.is_empty() {
            return Err("Voucher code is required".to_string());
        }
        if self.end_at <= self.start_at {
            return Err("end_at must be after start_at".to_string());
        }
        match self.discount_type {
            DiscountType::Percent if !(1..=100).contains(&self.discount_value) => {
                return Err("Percentage discount must be between 1 and 100".to_string());
            }
            DiscountType::Fixed if self.discount_value <= 0 => {
                return Err("Fixed discount must be greater than 0".to_string());
            }
            _ => {}
        }
        if self.max_discount.is_some_and(|cap| cap <= 0) {
            return Err("max_discount must be greater than 0".to_string());
        }
        if self.min_order_value < 0 {
            return Err("min_order_value cannot be negative".to_string());
        }
        if self.per_user_limit < 1 {
            return Err("per_user_limit must be at least 1".to_string());
        }
        if self.usage_limit.is_some_and(|limit| limit < 1) {
            return Err("usage_limit must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Partial voucher update. `Some(None)` clears `max_discount` or `usage_limit`.
#[derive(Debug, Clone, Default)]
pub struct UpdateVoucherParam {
    pub code: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<i64>,
    pub max_discount: Option<Option<i64>>,
    pub min_order_value: Option<i64>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<Option<i32>>,
    pub per_user_limit: Option<i32>,
    pub active: Option<bool>,
}

impl UpdateVoucherParam {
    pub fn from_dto(dto: UpdateVoucherDto) -> Self {
        Self {
            code: dto.code.as_deref().map(normalize_code),
            description: dto.description,
            discount_type: dto.discount_type,
            discount_value: dto.discount_value,
            max_discount: if dto.clear_max_discount {
                Some(None)
            } else {
                dto.max_discount.map(Some)
            },
            min_order_value: dto.min_order_value,
            start_at: dto.start_at,
            end_at: dto.end_at,
            usage_limit: if dto.clear_usage_limit {
                Some(None)
            } else {
                dto.usage_limit.map(Some)
            },
            per_user_limit: dto.per_user_limit,
            active: dto.active,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VoucherFilter {
    pub status: Option<VoucherStatus>,
    pub search: Option<String>,
}

impl VoucherFilter {
    pub fn from_query(query: &VoucherQuery) -> Self {
        Self {
            status: query.status,
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_uppercase),
        }
    }
}

/// Codes are matched case-insensitively by storing and looking them up uppercase.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};
    use test_utils::fixture::voucher::VoucherFixture;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    fn voucher(fixture: VoucherFixture) -> Voucher {
        Voucher::from_entity(fixture.build()).unwrap()
    }

    mod status {
        use super::*;

        #[test]
        fn disabled_wins_over_everything() {
            let v = voucher(
                VoucherFixture::new(now())
                    .active(false)
                    .usage(5, Some(5)),
            );

            assert_eq!(v.status(now()), VoucherStatus::Disabled);
        }

        #[test]
        fn upcoming_before_start() {
            let v = voucher(
                VoucherFixture::new(now())
                    .window(now() + Duration::hours(1), now() + Duration::days(1)),
            );

            assert_eq!(v.status(now()), VoucherStatus::Upcoming);
        }

        #[test]
        fn expired_after_end() {
            let v = voucher(
                VoucherFixture::new(now())
                    .window(now() - Duration::days(2), now() - Duration::seconds(1)),
            );

            assert_eq!(v.status(now()), VoucherStatus::Expired);
        }

        #[test]
        fn window_bounds_are_inclusive() {
            let v = voucher(VoucherFixture::new(now()).window(now(), now()));

            assert_eq!(v.status(now()), VoucherStatus::Active);
        }

        #[test]
        fn exhausted_when_limit_reached() {
            let v = voucher(VoucherFixture::new(now()).usage(3, Some(3)));

            assert_eq!(v.status(now()), VoucherStatus::Exhausted);
        }

        #[test]
        fn active_without_limit() {
            let v = voucher(VoucherFixture::new(now()).usage(1_000, None));

            assert_eq!(v.status(now()), VoucherStatus::Active);
        }
    }

    mod eligibility {
        use super::*;

        #[test]
        fn eligible_voucher_passes() {
            let v = voucher(VoucherFixture::new(now()).min_order_value(100));

            assert_eq!(v.check_eligibility(0, 100, now()), Ok(()));
        }

        #[test]
        fn inactive_reported_first() {
            let v = voucher(
                VoucherFixture::new(now())
                    .active(false)
                    .min_order_value(1_000),
            );

            assert_eq!(
                v.check_eligibility(5, 1, now()),
                Err(Ineligible::NotActive(VoucherStatus::Disabled))
            );
        }

        #[test]
        fn minimum_checked_before_per_user_limit() {
            let v = voucher(VoucherFixture::new(now()).min_order_value(500));

            assert_eq!(
                v.check_eligibility(1, 499, now()),
                Err(Ineligible::BelowMinimum(500))
            );
        }

        #[test]
        fn per_user_limit_enforced() {
            let v = voucher(VoucherFixture::new(now()).per_user_limit(2));

            assert_eq!(v.check_eligibility(1, 100, now()), Ok(()));
            assert_eq!(
                v.check_eligibility(2, 100, now()),
                Err(Ineligible::UsageLimitReached)
            );
        }
    }

    mod discount {
        use super::*;

        #[test]
        fn percent_floors() {
            let v = voucher(VoucherFixture::new(now()).percent(15));

            assert_eq!(v.compute_discount(999), 149);
        }

        #[test]
        fn percent_respects_cap() {
            let v = voucher(VoucherFixture::new(now()).percent(50).max_discount(20_000));

            assert_eq!(v.compute_discount(100_000), 20_000);
            assert_eq!(v.compute_discount(10_000), 5_000);
        }

        #[test]
        fn fixed_uses_value() {
            let v = voucher(VoucherFixture::new(now()).fixed(30_000));

            assert_eq!(v.compute_discount(100_000), 30_000);
        }

        #[test]
        fn never_exceeds_subtotal() {
            let v = voucher(VoucherFixture::new(now()).fixed(30_000));

            assert_eq!(v.compute_discount(12_000), 12_000);
        }

        #[test]
        fn full_percentage_is_whole_subtotal() {
            let v = voucher(VoucherFixture::new(now()).percent(100));

            assert_eq!(v.compute_discount(54_321), 54_321);
        }
    }

    mod validation {
        use super::*;

        fn fields() -> VoucherFields {
            VoucherFields {
                code: "SAVE".to_string(),
                description: None,
                discount_type: DiscountType::Percent,
                discount_value: 10,
                max_discount: None,
                min_order_value: 0,
                start_at: now(),
                end_at: now() + Duration::days(1),
                usage_limit: None,
                per_user_limit: 1,
                active: true,
            }
        }

        #[test]
        fn accepts_valid_fields() {
            assert!(fields().validate().is_ok());
        }

        #[test]
        fn rejects_inverted_window() {
            let mut f = fields();
            f.end_at = f.start_at;

            assert!(f.validate().is_err());
        }

        #[test]
        fn rejects_percent_out_of_range() {
            let mut f = fields();
            f.discount_value = 101;

            assert!(f.validate().is_err());
        }

        #[test]
        fn rejects_zero_fixed_value() {
            let mut f = fields();
            f.discount_type = DiscountType::Fixed;
            f.discount_value = 0;

            assert!(f.validate().is_err());
        }

        #[test]
        fn rejects_zero_limits() {
            let mut f = fields();
            f.per_user_limit = 0;
            assert!(f.validate().is_err());

            let mut f = fields();
            f.usage_limit = Some(0);
            assert!(f.validate().is_err());
        }

        #[test]
        fn normalizes_code() {
            assert_eq!(normalize_code("  summer10 "), "SUMMER10");
        }
    }
}
