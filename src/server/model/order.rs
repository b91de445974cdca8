//! Order domain model, status machine and placement parameters.

use chrono::{DateTime, Utc};

use crate::model::order::{
    AdminOrderQuery, OrderDto, OrderItemDto, OrderQuery, OrderStatus, PaymentMethod,
    PaymentStatus, PlaceOrderDto,
};
use crate::server::{error::AppError, util::parse::parse_enum};

impl OrderStatus {
    /// Whether an order may move from `self` to `next`.
    ///
    /// ```text
    /// pending   -> confirmed | cancelled
    /// confirmed -> shipping  | cancelled
    /// shipping  -> delivered | returned
    /// ```
    /// Delivered, cancelled and returned are terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Shipping)
                | (Confirmed, Cancelled)
                | (Shipping, Delivered)
                | (Shipping, Returned)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Returned
        )
    }

    /// Entering this status puts reserved stock back and frees the voucher.
    pub fn releases_stock(self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Returned)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub sku: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub line_total: i64,
}

impl OrderItem {
    pub fn from_entity(entity: entity::order_item::Model) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            product_id: entity.product_id,
            product_name: entity.product_name,
            sku: entity.sku,
            unit_price: entity.unit_price,
            quantity: entity.quantity,
            line_total: entity.line_total,
        }
    }

    pub fn into_dto(self) -> OrderItemDto {
        OrderItemDto {
            id: self.id,
            product_id: self.product_id,
            product_name: self.product_name,
            sku: self.sku,
            unit_price: self.unit_price,
            quantity: self.quantity,
            line_total: self.line_total,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub code: String,
    pub user_id: i32,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub subtotal: i64,
    pub discount: i64,
    pub shipping_fee: i64,
    pub total: i64,
    pub voucher_id: Option<i32>,
    pub voucher_code: Option<String>,
    pub shipping_name: String,
    pub shipping_phone: String,
    pub shipping_address: String,
    pub note: Option<String>,
    pub cancel_reason: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Converts the order row and its items at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Order)` - The converted domain model
    /// - `Err(AppError::InternalErr(ParseEnum))` - A stored status column holds an unknown value
    pub fn from_entity(
        entity: entity::order::Model,
        items: Vec<entity::order_item::Model>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            code: entity.code,
            user_id: entity.user_id,
            status: parse_enum(&entity.status)?,
            payment_status: parse_enum(&entity.payment_status)?,
            payment_method: parse_enum(&entity.payment_method)?,
            subtotal: entity.subtotal,
            discount: entity.discount,
            shipping_fee: entity.shipping_fee,
            total: entity.total,
            voucher_id: entity.voucher_id,
            voucher_code: entity.voucher_code,
            shipping_name: entity.shipping_name,
            shipping_phone: entity.shipping_phone,
            shipping_address: entity.shipping_address,
            note: entity.note,
            cancel_reason: entity.cancel_reason,
            items: items.into_iter().map(OrderItem::from_entity).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> OrderDto {
        OrderDto {
            id: self.id,
            code: self.code,
            user_id: self.user_id,
            status: self.status,
            payment_status: self.payment_status,
            payment_method: self.payment_method,
            subtotal: self.subtotal,
            discount: self.discount,
            shipping_fee: self.shipping_fee,
            total: self.total,
            voucher_code: self.voucher_code,
            shipping_name: self.shipping_name,
            shipping_phone: self.shipping_phone,
            shipping_address: self.shipping_address,
            note: self.note,
            cancel_reason: self.cancel_reason,
            items: self.items.into_iter().map(OrderItem::into_dto).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Money fields computed at placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: i64,
    pub discount: i64,
    pub shipping_fee: i64,
    pub total: i64,
}

impl OrderTotals {
    /// Shipping is free once `subtotal - discount` reaches `free_threshold`.
    pub fn compute(subtotal: i64, discount: i64, shipping_fee: i64, free_threshold: i64) -> Self {
        let after_discount = subtotal - discount;
        let shipping_fee = if after_discount >= free_threshold {
            0
        } else {
            shipping_fee
        };

        Self {
            subtotal,
            discount,
            shipping_fee,
            total: after_discount + shipping_fee,
        }
    }
}

/// Row values for a new order, after totals and code are known.
#[derive(Debug, Clone)]
pub struct CreateOrderParam {
    pub code: String,
    pub user_id: i32,
    pub payment_method: PaymentMethod,
    pub totals: OrderTotals,
    pub voucher_id: Option<i32>,
    pub voucher_code: Option<String>,
    pub shipping_name: String,
    pub shipping_phone: String,
    pub shipping_address: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderItemParam {
    pub product_id: i32,
    pub product_name: String,
    pub sku: String,
    pub unit_price: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct PlaceOrderParam {
    pub user_id: i32,
    pub lines: Vec<OrderLine>,
    pub voucher_code: Option<String>,
    pub payment_method: PaymentMethod,
    pub shipping_name: String,
    pub shipping_phone: String,
    pub shipping_address: String,
    pub note: Option<String>,
}

impl PlaceOrderParam {
    pub fn from_dto(user_id: i32, dto: PlaceOrderDto) -> Self {
        Self {
            user_id,
            lines: dto
                .items
                .into_iter()
                .map(|line| OrderLine {
                    product_id: line.product_id,
                    quantity: line.quantity,
                })
                .collect(),
            voucher_code: dto
                .voucher_code
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            payment_method: dto.payment_method,
            shipping_name: dto.shipping_name.trim().to_string(),
            shipping_phone: dto.shipping_phone.trim().to_string(),
            shipping_address: dto.shipping_address.trim().to_string(),
            note: dto.note,
        }
    }
}

/// Merges lines for the same product, keeping first-seen order.
///
/// # Returns
/// - `Ok(Vec<OrderLine>)` - One line per product
/// - `Err(AppError::BadRequest)` - A merged quantity does not fit in an `i32`
pub fn merge_lines(lines: Vec<OrderLine>) -> Result<Vec<OrderLine>, AppError> {
    let mut merged: Vec<OrderLine> = Vec::with_capacity(lines.len());

    for line in lines {
        match merged.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(line.quantity)
                    .ok_or_else(|| {
                        AppError::BadRequest(format!(
                            "Quantity for product {} is too large",
                            line.product_id
                        ))
                    })?;
            }
            None => merged.push(line),
        }
    }

    Ok(merged)
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub user_id: Option<i32>,
    pub search: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl OrderFilter {
    /// Customer listing: always scoped to the caller.
    pub fn for_user(user_id: i32, query: &OrderQuery) -> Self {
        Self {
            status: query.status,
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    pub fn from_admin_query(query: &AdminOrderQuery) -> Self {
        Self {
            status: query.status,
            payment_status: query.payment_status,
            user_id: query.user_id,
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_uppercase),
            from: query.from,
            to: query.to,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    mod transitions {
        use super::*;

        #[test]
        fn allows_forward_path() {
            assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
            assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Shipping));
            assert!(OrderStatus::Shipping.can_transition_to(OrderStatus::Delivered));
        }

        #[test]
        fn cancellation_only_before_shipping() {
            assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
            assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
            assert!(!OrderStatus::Shipping.can_transition_to(OrderStatus::Cancelled));
        }

        #[test]
        fn return_only_from_shipping() {
            assert!(OrderStatus::Shipping.can_transition_to(OrderStatus::Returned));
            assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Returned));
        }

        #[test]
        fn terminal_states_go_nowhere() {
            for from in [
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
                OrderStatus::Returned,
            ] {
                assert!(from.is_terminal());
                for to in OrderStatus::ALL {
                    assert!(!from.can_transition_to(*to), "{} -> {}", from, to);
                }
            }
        }

        #[test]
        fn no_skipping() {
            assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Shipping));
            assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
            assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
        }
    }

    mod totals {
        use super::*;

        #[test]
        fn charges_shipping_below_threshold() {
            let totals = OrderTotals::compute(200_000, 0, 30_000, 500_000);

            assert_eq!(totals.shipping_fee, 30_000);
            assert_eq!(totals.total, 230_000);
        }

        #[test]
        fn free_shipping_at_threshold_after_discount() {
            let totals = OrderTotals::compute(550_000, 50_000, 30_000, 500_000);

            assert_eq!(totals.shipping_fee, 0);
            assert_eq!(totals.total, 500_000);
        }

        #[test]
        fn discount_can_drop_below_threshold() {
            let totals = OrderTotals::compute(520_000, 30_000, 30_000, 500_000);

            assert_eq!(totals.shipping_fee, 30_000);
            assert_eq!(totals.total, 520_000);
        }
    }

    #[test]
    fn merges_duplicate_lines() {
        let merged = merge_lines(vec![
            OrderLine {
                product_id: 2,
                quantity: 1,
            },
            OrderLine {
                product_id: 5,
                quantity: 2,
            },
            OrderLine {
                product_id: 2,
                quantity: 3,
            },
        ])
        .unwrap();

        assert_eq!(
            merged,
            vec![
                OrderLine {
                    product_id: 2,
                    quantity: 4
                },
                OrderLine {
                    product_id: 5,
                    quantity: 2
                },
            ]
        );
    }

    #[test]
    fn merged_quantity_overflow_is_rejected() {
        let result = merge_lines(vec![
            OrderLine {
                product_id: 2,
                quantity: i32::MAX,
            },
            OrderLine {
                product_id: 2,
                quantity: 2,
            },
        ]);

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
