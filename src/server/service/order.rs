//! Order placement and the order status machine.
//!
//! Placement and every status change run inside one transaction: stock, inventory
//! movements, voucher usage and the customer notification commit or roll back
//! together. [`apply_transition`] is shared with the delivery service, which drives
//! orders to `shipping`, `delivered` and `returned`.

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        inventory::MovementKind,
        notification::NotificationKind,
        order::{OrderStatus, PaymentMethod, PaymentStatus},
    },
    server::{
        cache::ResponseCache,
        config::ShopSettings,
        data::{
            inventory::InventoryRepository, order::OrderRepository, product::ProductRepository,
            voucher::VoucherRepository,
        },
        error::AppError,
        model::{
            inventory::RecordMovementParam,
            order::{
                merge_lines, CreateOrderItemParam, CreateOrderParam, Order, OrderFilter,
                OrderTotals, PlaceOrderParam,
            },
            pagination::{PageRequest, Paginated},
        },
        service::{notification::notify, voucher::evaluate},
        util::code::order_code,
    },
};

const MAX_CODE_ATTEMPTS: usize = 5;

/// Moves `order` to `to` and applies the side effects of entering that status.
///
/// - `cancelled` / `returned`: stock comes back through `return` movements and the
///   voucher usage is released.
/// - `delivered` on a cash-on-delivery order: the order becomes paid.
/// - Always: the owner is notified.
///
/// `order` must have been read on `db`; the status write is conditional on the status
/// it was read in.
///
/// # Returns
/// - `Ok(Order)` - The order after the transition
/// - `Err(AppError::BadRequest)` - The status machine does not allow the move
/// - `Err(AppError::Conflict)` - The order changed status since it was read
pub async fn apply_transition<C: ConnectionTrait>(
    db: &C,
    order: &Order,
    to: OrderStatus,
    reason: Option<String>,
) -> Result<Order, AppError> {
    if !order.status.can_transition_to(to) {
        return Err(AppError::BadRequest(format!(
            "Cannot change order status from {} to {}",
            order.status, to
        )));
    }

    let order_repo = OrderRepository::new(db);
    if !order_repo
        .set_status(order.id, order.status, to, reason)
        .await?
    {
        return Err(AppError::Conflict(format!(
            "Order {} is no longer {}",
            order.code, order.status
        )));
    }

    if to.releases_stock() {
        restock(db, order, to).await?;
        VoucherRepository::new(db).release_usage(order.id).await?;
    }

    if to == OrderStatus::Delivered
        && order.payment_method == PaymentMethod::Cod
        && order.payment_status == PaymentStatus::Unpaid
    {
        order_repo
            .set_payment_status(order.id, PaymentStatus::Paid)
            .await?;
    }

    notify(
        db,
        order.user_id,
        NotificationKind::Order,
        format!("Order {} {}", order.code, to),
        format!("Your order {} is now {}.", order.code, to),
        Some(format!("/orders/{}", order.id)),
    )
    .await?;

    tracing::info!(
        order_id = order.id,
        from = %order.status,
        to = %to,
        "Order status changed"
    );

    order_repo
        .find_by_id(order.id)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))
}

/// Puts every line's quantity back on the shelf.
async fn restock<C: ConnectionTrait>(
    db: &C,
    order: &Order,
    to: OrderStatus,
) -> Result<(), AppError> {
    let product_repo = ProductRepository::new(db);
    let inventory_repo = InventoryRepository::new(db);

    for item in &order.items {
        let Some(product) = product_repo.find_by_id(item.product_id).await? else {
            tracing::warn!(
                order_id = order.id,
                product_id = item.product_id,
                "Skipping restock of missing product"
            );
            continue;
        };

        let stock_after = product.stock.checked_add(item.quantity).ok_or_else(|| {
            AppError::InternalError(format!("Stock of product {} overflows", product.id))
        })?;
        product_repo.set_stock(product.id, stock_after).await?;
        inventory_repo
            .record(RecordMovementParam {
                product_id: product.id,
                kind: MovementKind::Return,
                quantity: item.quantity,
                stock_before: product.stock,
                stock_after,
                reference: Some(order.code.clone()),
                note: Some(format!("Order {}", to)),
                user_id: None,
            })
            .await?;
    }

    Ok(())
}

pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
    shop: ShopSettings,
}

impl<'a> OrderService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache, shop: ShopSettings) -> Self {
        Self { db, cache, shop }
    }

    /// Places an order for `param.user_id`.
    ///
    /// Validates lines and stock, prices each line at the product's effective price,
    /// applies the voucher, computes shipping, writes `sale` movements, records the
    /// voucher usage and notifies the customer, all in one transaction.
    ///
    /// # Returns
    /// - `Ok(Order)` - The placed order in `pending`/`unpaid`
    /// - `Err(AppError::BadRequest)` - Empty order, bad quantity, unavailable product,
    ///   insufficient stock or ineligible voucher
    /// - `Err(AppError::NotFound)` - Unknown voucher code
    pub async fn place(&self, param: PlaceOrderParam) -> Result<Order, AppError> {
        if param.lines.is_empty() {
            return Err(AppError::BadRequest(
                "Order must contain at least one item".to_string(),
            ));
        }
        if param.lines.iter().any(|line| line.quantity < 1) {
            return Err(AppError::BadRequest(
                "Item quantity must be at least 1".to_string(),
            ));
        }
        if param.shipping_name.is_empty()
            || param.shipping_phone.is_empty()
            || param.shipping_address.is_empty()
        {
            return Err(AppError::BadRequest(
                "Shipping name, phone and address are required".to_string(),
            ));
        }

        let lines = merge_lines(param.lines)?;
        let now = Utc::now();

        let txn = self.db.begin().await?;
        let product_repo = ProductRepository::new(&txn);

        let ids: Vec<i32> = lines.iter().map(|line| line.product_id).collect();
        let products = product_repo.find_by_ids(&ids).await?;

        let mut items = Vec::with_capacity(lines.len());
        let mut reserved = Vec::with_capacity(lines.len());
        for line in &lines {
            let product = products
                .iter()
                .find(|p| p.id == line.product_id && p.active)
                .ok_or_else(|| {
                    AppError::BadRequest(format!("Product {} is not available", line.product_id))
                })?;

            if product.stock < line.quantity {
                return Err(AppError::BadRequest(format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    product.name, product.stock, line.quantity
                )));
            }

            items.push(CreateOrderItemParam {
                product_id: product.id,
                product_name: product.name.clone(),
                sku: product.sku.clone(),
                unit_price: product.effective_price(),
                quantity: line.quantity,
            });
            reserved.push((product.id, product.stock, line.quantity));
        }

        let subtotal = items.iter().try_fold(0i64, |sum, item| {
            item.unit_price
                .checked_mul(i64::from(item.quantity))
                .and_then(|line_total| sum.checked_add(line_total))
                .ok_or_else(|| AppError::BadRequest("Order total is too large".to_string()))
        })?;
        if subtotal.checked_add(self.shop.shipping_fee).is_none() {
            return Err(AppError::BadRequest("Order total is too large".to_string()));
        }

        let applied = match param.voucher_code.as_deref() {
            Some(code) => Some(evaluate(&txn, code, param.user_id, subtotal, now).await?),
            None => None,
        };
        let discount = applied.as_ref().map_or(0, |a| a.discount);

        let totals = OrderTotals::compute(
            subtotal,
            discount,
            self.shop.shipping_fee,
            self.shop.free_shipping_threshold,
        );

        let order_repo = OrderRepository::new(&txn);
        let code = unused_code(&order_repo, now).await?;

        let order = order_repo
            .create(
                CreateOrderParam {
                    code,
                    user_id: param.user_id,
                    payment_method: param.payment_method,
                    totals,
                    voucher_id: applied.as_ref().map(|a| a.voucher.id),
                    voucher_code: applied.as_ref().map(|a| a.voucher.code.clone()),
                    shipping_name: param.shipping_name,
                    shipping_phone: param.shipping_phone,
                    shipping_address: param.shipping_address,
                    note: param.note,
                },
                items,
            )
            .await?;

        let inventory_repo = InventoryRepository::new(&txn);
        for (product_id, stock_before, quantity) in &reserved {
            let stock_after = stock_before - quantity;
            product_repo.set_stock(*product_id, stock_after).await?;
            inventory_repo
                .record(RecordMovementParam {
                    product_id: *product_id,
                    kind: MovementKind::Sale,
                    quantity: *quantity,
                    stock_before: *stock_before,
                    stock_after,
                    reference: Some(order.code.clone()),
                    note: None,
                    user_id: Some(order.user_id),
                })
                .await?;
        }

        if let Some(applied) = &applied {
            VoucherRepository::new(&txn)
                .record_usage(applied.voucher.id, order.user_id, order.id, applied.discount)
                .await?;
            tracing::info!(
                order_id = order.id,
                voucher = %applied.voucher.code,
                discount = applied.discount,
                "Voucher redeemed"
            );
        }

        notify(
            &txn,
            order.user_id,
            NotificationKind::Order,
            "Order placed",
            format!(
                "Your order {} has been placed. Total: {}.",
                order.code, order.total
            ),
            Some(format!("/orders/{}", order.id)),
        )
        .await?;

        txn.commit().await?;

        for (product_id, _, _) in &reserved {
            self.cache.invalidate_product(*product_id).await;
        }

        tracing::info!(
            order_id = order.id,
            code = %order.code,
            user_id = order.user_id,
            total = order.total,
            "Order placed"
        );

        Ok(order)
    }

    pub async fn list(
        &self,
        filter: OrderFilter,
        page: PageRequest,
    ) -> Result<Paginated<Order>, AppError> {
        OrderRepository::new(self.db).list(filter, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Order, AppError> {
        OrderRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))
    }

    /// The order if it belongs to `user_id`; someone else's order is a 404.
    pub async fn get_for_user(&self, user_id: i32, id: i32) -> Result<Order, AppError> {
        let order = self.get(id).await?;
        if order.user_id != user_id {
            return Err(AppError::not_found("Order"));
        }
        Ok(order)
    }

    /// Customer cancellation, allowed only while the order is pending.
    pub async fn cancel_by_customer(
        &self,
        user_id: i32,
        id: i32,
        reason: Option<String>,
    ) -> Result<Order, AppError> {
        self.transition(id, Some(user_id), OrderStatus::Cancelled, reason)
            .await
    }

    /// Admin status change through the status machine.
    pub async fn update_status(
        &self,
        id: i32,
        status: OrderStatus,
        reason: Option<String>,
    ) -> Result<Order, AppError> {
        self.transition(id, None, status, reason).await
    }

    pub async fn update_payment_status(
        &self,
        id: i32,
        payment_status: PaymentStatus,
    ) -> Result<Order, AppError> {
        let order = OrderRepository::new(self.db)
            .set_payment_status(id, payment_status)
            .await?
            .ok_or_else(|| AppError::not_found("Order"))?;

        tracing::info!(order_id = id, payment_status = %payment_status, "Order payment status changed");

        Ok(order)
    }

    /// Reads the order and moves it inside one transaction. With `owner` set, only that
    /// customer's pending order may move.
    async fn transition(
        &self,
        id: i32,
        owner: Option<i32>,
        to: OrderStatus,
        reason: Option<String>,
    ) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;

        let order = OrderRepository::new(&txn)
            .find_by_id(id)
            .await?
            .filter(|order| owner.is_none_or(|user_id| order.user_id == user_id))
            .ok_or_else(|| AppError::not_found("Order"))?;
        if owner.is_some() && order.status != OrderStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending orders can be cancelled".to_string(),
            ));
        }

        let updated = apply_transition(&txn, &order, to, reason).await?;
        txn.commit().await?;

        if to.releases_stock() {
            for item in &order.items {
                self.cache.invalidate_product(item.product_id).await;
            }
        }

        Ok(updated)
    }
}

/// Generates order codes until one is free.
async fn unused_code<C: ConnectionTrait>(
    repo: &OrderRepository<'_, C>,
    now: chrono::DateTime<Utc>,
) -> Result<String, AppError> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = order_code(now);
        if !repo.code_exists(&code).await? {
            return Ok(code);
        }
    }

    Err(AppError::InternalError(
        "Could not generate a unique order code".to_string(),
    ))
}
