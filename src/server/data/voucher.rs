//! Voucher and voucher usage repository.
//!
//! Voucher status is derived from the row and the current time, so status filters are
//! translated into equivalent SQL conditions for a given `now`.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::voucher::VoucherStatus,
    server::{
        error::AppError,
        model::{
            pagination::{PageRequest, Paginated},
            voucher::{Voucher, VoucherFields, VoucherFilter, VoucherUsage},
        },
    },
};

pub struct VoucherRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VoucherRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, fields: VoucherFields) -> Result<Voucher, AppError> {
        let now = Utc::now();
        let entity = entity::voucher::ActiveModel {
            code: ActiveValue::Set(fields.code),
            description: ActiveValue::Set(fields.description),
            discount_type: ActiveValue::Set(fields.discount_type.to_string()),
            discount_value: ActiveValue::Set(fields.discount_value),
            max_discount: ActiveValue::Set(fields.max_discount),
            min_order_value: ActiveValue::Set(fields.min_order_value),
            start_at: ActiveValue::Set(fields.start_at),
            end_at: ActiveValue::Set(fields.end_at),
            usage_limit: ActiveValue::Set(fields.usage_limit),
            used_count: ActiveValue::Set(0),
            per_user_limit: ActiveValue::Set(fields.per_user_limit),
            active: ActiveValue::Set(fields.active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Voucher::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Voucher>, AppError> {
        entity::prelude::Voucher::find_by_id(id)
            .one(self.db)
            .await?
            .map(Voucher::from_entity)
            .transpose()
    }

    /// Looks up a voucher by its normalized (uppercase) code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Voucher>, AppError> {
        entity::prelude::Voucher::find()
            .filter(entity::voucher::Column::Code.eq(code))
            .one(self.db)
            .await?
            .map(Voucher::from_entity)
            .transpose()
    }

    pub async fn code_taken(&self, code: &str, exclude_id: Option<i32>) -> Result<bool, AppError> {
        let mut query =
            entity::prelude::Voucher::find().filter(entity::voucher::Column::Code.eq(code));
        if let Some(id) = exclude_id {
            query = query.filter(entity::voucher::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Overwrites the editable fields; `used_count` is left alone.
    pub async fn update(&self, id: i32, fields: VoucherFields) -> Result<Option<Voucher>, AppError> {
        let Some(entity) = entity::prelude::Voucher::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::voucher::ActiveModel = entity.into();
        active.code = ActiveValue::Set(fields.code);
        active.description = ActiveValue::Set(fields.description);
        active.discount_type = ActiveValue::Set(fields.discount_type.to_string());
        active.discount_value = ActiveValue::Set(fields.discount_value);
        active.max_discount = ActiveValue::Set(fields.max_discount);
        active.min_order_value = ActiveValue::Set(fields.min_order_value);
        active.start_at = ActiveValue::Set(fields.start_at);
        active.end_at = ActiveValue::Set(fields.end_at);
        active.usage_limit = ActiveValue::Set(fields.usage_limit);
        active.per_user_limit = ActiveValue::Set(fields.per_user_limit);
        active.active = ActiveValue::Set(fields.active);
        active.updated_at = ActiveValue::Set(Utc::now());

        Voucher::from_entity(active.update(self.db).await?).map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Voucher::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists vouchers newest first. A status filter is evaluated at `now`.
    pub async fn list(
        &self,
        filter: VoucherFilter,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<Paginated<Voucher>, AppError> {
        let mut query = entity::prelude::Voucher::find();
        if let Some(status) = filter.status {
            query = query.filter(status_condition(status, now));
        }
        if let Some(search) = filter.search {
            query = query.filter(entity::voucher::Column::Code.contains(&search));
        }

        let paginator = query
            .order_by_desc(entity::voucher::Column::CreatedAt)
            .order_by_desc(entity::voucher::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let vouchers = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Voucher::from_entity)
            .collect::<Result<_, _>>()?;

        Ok(Paginated::new(vouchers, page, total))
    }

    /// Every voucher whose status is `active` at `now`, ending soonest first.
    pub async fn list_available(&self, now: DateTime<Utc>) -> Result<Vec<Voucher>, AppError> {
        entity::prelude::Voucher::find()
            .filter(status_condition(VoucherStatus::Active, now))
            .order_by_asc(entity::voucher::Column::EndAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Voucher::from_entity)
            .collect()
    }

    /// Number of orders `user_id` has redeemed `voucher_id` on.
    pub async fn user_usage_count(&self, voucher_id: i32, user_id: i32) -> Result<u64, AppError> {
        let count = entity::prelude::VoucherUsage::find()
            .filter(entity::voucher_usage::Column::VoucherId.eq(voucher_id))
            .filter(entity::voucher_usage::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Inserts a usage row and bumps `used_count` by one.
    pub async fn record_usage(
        &self,
        voucher_id: i32,
        user_id: i32,
        order_id: i32,
        discount: i64,
    ) -> Result<VoucherUsage, AppError> {
        let entity = entity::voucher_usage::ActiveModel {
            voucher_id: ActiveValue::Set(voucher_id),
            user_id: ActiveValue::Set(user_id),
            order_id: ActiveValue::Set(order_id),
            discount: ActiveValue::Set(discount),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        entity::prelude::Voucher::update_many()
            .filter(entity::voucher::Column::Id.eq(voucher_id))
            .col_expr(
                entity::voucher::Column::UsedCount,
                Expr::cust("used_count + 1"),
            )
            .exec(self.db)
            .await?;

        Ok(VoucherUsage::from_entity(entity))
    }

    /// Deletes the usage recorded for `order_id` and decrements `used_count`.
    ///
    /// # Returns
    /// - `Ok(Some(VoucherUsage))` - The released usage
    /// - `Ok(None)` - The order had no voucher usage
    pub async fn release_usage(&self, order_id: i32) -> Result<Option<VoucherUsage>, AppError> {
        let Some(usage) = entity::prelude::VoucherUsage::find()
            .filter(entity::voucher_usage::Column::OrderId.eq(order_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        entity::prelude::VoucherUsage::delete_by_id(usage.id)
            .exec(self.db)
            .await?;

        entity::prelude::Voucher::update_many()
            .filter(entity::voucher::Column::Id.eq(usage.voucher_id))
            .filter(entity::voucher::Column::UsedCount.gt(0))
            .col_expr(
                entity::voucher::Column::UsedCount,
                Expr::cust("used_count - 1"),
            )
            .exec(self.db)
            .await?;

        Ok(Some(VoucherUsage::from_entity(usage)))
    }

    /// Usages of a voucher, newest first.
    pub async fn usages(&self, voucher_id: i32) -> Result<Vec<VoucherUsage>, AppError> {
        let entities = entity::prelude::VoucherUsage::find()
            .filter(entity::voucher_usage::Column::VoucherId.eq(voucher_id))
            .order_by_desc(entity::voucher_usage::Column::CreatedAt)
            .order_by_desc(entity::voucher_usage::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(VoucherUsage::from_entity).collect())
    }
}

/// SQL condition selecting vouchers whose derived status at `now` is `status`.
fn status_condition(status: VoucherStatus, now: DateTime<Utc>) -> Condition {
    use entity::voucher::Column;

    let within_window = Condition::all()
        .add(Column::Active.eq(true))
        .add(Column::StartAt.lte(now))
        .add(Column::EndAt.gte(now));

    match status {
        VoucherStatus::Disabled => Condition::all().add(Column::Active.eq(false)),
        VoucherStatus::Upcoming => Condition::all()
            .add(Column::Active.eq(true))
            .add(Column::StartAt.gt(now)),
        VoucherStatus::Expired => Condition::all()
            .add(Column::Active.eq(true))
            .add(Column::StartAt.lte(now))
            .add(Column::EndAt.lt(now)),
        VoucherStatus::Exhausted => within_window
            .add(Column::UsageLimit.is_not_null())
            .add(Expr::cust("used_count >= usage_limit")),
        VoucherStatus::Active => within_window.add(
            Condition::any()
                .add(Column::UsageLimit.is_null())
                .add(Expr::cust("used_count < usage_limit")),
        ),
    }
}
