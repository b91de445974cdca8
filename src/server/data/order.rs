//! Order data repository.
//!
//! Orders are stored as an `orders` row plus `order_item` rows. Every read loads the
//! items with a single extra query per page so domain `Order`s are always complete.
//! Status and payment writes go through `set_status` / `set_payment_status`; the side
//! effects of a transition (stock, vouchers, notifications) are the service's job.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::{
    model::order::{OrderStatus, PaymentStatus},
    server::{
        error::AppError,
        model::{
            order::{CreateOrderItemParam, CreateOrderParam, Order, OrderFilter},
            pagination::{PageRequest, Paginated},
        },
        util::parse::parse_enum,
    },
};

/// Repository providing database operations for orders and their line items.
pub struct OrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    /// Creates a new OrderRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to a database connection or transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an order in `pending`/`unpaid` together with its line items.
    ///
    /// Must run inside the placement transaction: stock and voucher usage are written
    /// by the caller around this insert.
    ///
    /// # Arguments
    /// - `param` - Order row values with computed totals and code
    /// - `items` - Line snapshots; `line_total` is derived here
    ///
    /// # Returns
    /// - `Ok(Order)` - The created order with items
    /// - `Err(AppError::DbErr)` - Insert failed (e.g. code collision)
    pub async fn create(
        &self,
        param: CreateOrderParam,
        items: Vec<CreateOrderItemParam>,
    ) -> Result<Order, AppError> {
        let now = Utc::now();
        let order = entity::order::ActiveModel {
            code: ActiveValue::Set(param.code),
            user_id: ActiveValue::Set(param.user_id),
            status: ActiveValue::Set(OrderStatus::Pending.to_string()),
            payment_status: ActiveValue::Set(PaymentStatus::Unpaid.to_string()),
            payment_method: ActiveValue::Set(param.payment_method.to_string()),
            subtotal: ActiveValue::Set(param.totals.subtotal),
            discount: ActiveValue::Set(param.totals.discount),
            shipping_fee: ActiveValue::Set(param.totals.shipping_fee),
            total: ActiveValue::Set(param.totals.total),
            voucher_id: ActiveValue::Set(param.voucher_id),
            voucher_code: ActiveValue::Set(param.voucher_code),
            shipping_name: ActiveValue::Set(param.shipping_name),
            shipping_phone: ActiveValue::Set(param.shipping_phone),
            shipping_address: ActiveValue::Set(param.shipping_address),
            note: ActiveValue::Set(param.note),
            cancel_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut item_entities = Vec::with_capacity(items.len());
        for item in items {
            let entity = entity::order_item::ActiveModel {
                order_id: ActiveValue::Set(order.id),
                product_id: ActiveValue::Set(item.product_id),
                product_name: ActiveValue::Set(item.product_name),
                sku: ActiveValue::Set(item.sku),
                unit_price: ActiveValue::Set(item.unit_price),
                quantity: ActiveValue::Set(item.quantity),
                line_total: ActiveValue::Set(item.unit_price * i64::from(item.quantity)),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            item_entities.push(entity);
        }

        Order::from_entity(order, item_entities)
    }

    /// Finds an order by ID with its items.
    ///
    /// # Returns
    /// - `Ok(Some(Order))` - The order
    /// - `Ok(None)` - No order with that id
    /// - `Err(AppError)` - Database error or unparseable stored status
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Order>, AppError> {
        let Some(entity) = entity::prelude::Order::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut orders = self.with_items(vec![entity]).await?;

        Ok(orders.pop())
    }

    pub async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let count = entity::prelude::Order::find()
            .filter(entity::order::Column::Code.eq(code))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Loads the orders whose ids are in `ids`, ordered by id.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Order>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Order::find()
            .filter(entity::order::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::order::Column::Id)
            .all(self.db)
            .await?;

        self.with_items(entities).await
    }

    /// Lists orders newest first.
    pub async fn list(
        &self,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Paginated<Order>, AppError> {
        let paginator = Self::filtered(filter)
            .order_by_desc(entity::order::Column::CreatedAt)
            .order_by_desc(entity::order::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;
        let orders = self.with_items(entities).await?;

        Ok(Paginated::new(orders, page, total))
    }

    /// Moves an order from `from` to `to`; `cancel_reason` is stored when given.
    ///
    /// The write only applies while the stored status is still `from`.
    ///
    /// # Returns
    /// - `Ok(true)` - The status was written
    /// - `Ok(false)` - No order with that id in status `from`
    pub async fn set_status(
        &self,
        id: i32,
        from: OrderStatus,
        to: OrderStatus,
        cancel_reason: Option<String>,
    ) -> Result<bool, AppError> {
        let mut update = entity::prelude::Order::update_many()
            .filter(entity::order::Column::Id.eq(id))
            .filter(entity::order::Column::Status.eq(from.as_str()))
            .col_expr(entity::order::Column::Status, Expr::value(to.as_str()))
            .col_expr(entity::order::Column::UpdatedAt, Expr::value(Utc::now()));
        if let Some(reason) = cancel_reason {
            update = update.col_expr(entity::order::Column::CancelReason, Expr::value(reason));
        }

        let result = update.exec(self.db).await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn set_payment_status(
        &self,
        id: i32,
        payment_status: PaymentStatus,
    ) -> Result<Option<Order>, AppError> {
        let Some(entity) = entity::prelude::Order::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::order::ActiveModel = entity.into();
        active.payment_status = ActiveValue::Set(payment_status.to_string());
        active.updated_at = ActiveValue::Set(Utc::now());
        let entity = active.update(self.db).await?;

        let mut orders = self.with_items(vec![entity]).await?;

        Ok(orders.pop())
    }

    /// Marks every order in `ids` as paid, returning the number of rows changed.
    pub async fn mark_paid(&self, ids: &[i32]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Order::update_many()
            .filter(entity::order::Column::Id.is_in(ids.iter().copied()))
            .col_expr(
                entity::order::Column::PaymentStatus,
                Expr::value(PaymentStatus::Paid.as_str()),
            )
            .col_expr(entity::order::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Whether any order line references `product_id`.
    pub async fn product_is_ordered(&self, product_id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::ProductId.eq(product_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Number of orders per status. Statuses without orders are absent.
    pub async fn count_by_status(&self) -> Result<Vec<(OrderStatus, u64)>, AppError> {
        let rows = entity::prelude::Order::find()
            .select_only()
            .column(entity::order::Column::Status)
            .column_as(Expr::cust("COUNT(*)"), "count")
            .group_by(entity::order::Column::Status)
            .into_tuple::<(String, i64)>()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(status, count)| Ok((parse_enum(&status)?, count.max(0) as u64)))
            .collect()
    }

    /// Sum of `total` over orders in `status`.
    pub async fn sum_total_by_status(&self, status: OrderStatus) -> Result<i64, AppError> {
        self.sum_total(
            entity::prelude::Order::find()
                .filter(entity::order::Column::Status.eq(status.as_str())),
        )
        .await
    }

    /// Sum of `total` over orders with `payment_status`.
    pub async fn sum_total_by_payment(&self, payment_status: PaymentStatus) -> Result<i64, AppError> {
        self.sum_total(
            entity::prelude::Order::find()
                .filter(entity::order::Column::PaymentStatus.eq(payment_status.as_str())),
        )
        .await
    }

    async fn sum_total(&self, query: Select<entity::prelude::Order>) -> Result<i64, AppError> {
        let sum = query
            .select_only()
            .column_as(Expr::cust("COALESCE(SUM(total), 0)"), "sum")
            .into_tuple::<i64>()
            .one(self.db)
            .await?;

        Ok(sum.unwrap_or(0))
    }

    fn filtered(filter: OrderFilter) -> Select<entity::prelude::Order> {
        use entity::order::Column;

        let mut query = entity::prelude::Order::find();
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(payment_status) = filter.payment_status {
            query = query.filter(Column::PaymentStatus.eq(payment_status.as_str()));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(Column::UserId.eq(user_id));
        }
        if let Some(search) = filter.search {
            query = query.filter(Column::Code.contains(&search));
        }
        if let Some(from) = filter.from {
            query = query.filter(Column::CreatedAt.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(Column::CreatedAt.lte(to));
        }

        query
    }

    /// Attaches line items to each order row, preserving the row order.
    async fn with_items(&self, entities: Vec<entity::order::Model>) -> Result<Vec<Order>, AppError> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = entities.iter().map(|o| o.id).collect();
        let items = entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.is_in(ids))
            .order_by_asc(entity::order_item::Column::Id)
            .all(self.db)
            .await?;

        let mut by_order: HashMap<i32, Vec<entity::order_item::Model>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        entities
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                Order::from_entity(order, items)
            })
            .collect()
    }
}
