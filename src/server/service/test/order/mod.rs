use super::test_cache;
use crate::{
    model::order::{OrderStatus, PaymentMethod, PaymentStatus},
    server::{
        config::ShopSettings,
        data::{
            notification::NotificationRepository, product::ProductRepository,
            voucher::VoucherRepository,
        },
        error::AppError,
        model::order::{OrderLine, PlaceOrderParam},
        service::order::{apply_transition, OrderService},
    },
};
use test_utils::{builder::TestBuilder, factory};

mod cancel;
mod place;
mod status;

/// Cash-on-delivery placement with a valid shipping address.
fn place_param(user_id: i32, lines: Vec<(i32, i32)>, voucher_code: Option<String>) -> PlaceOrderParam {
    PlaceOrderParam {
        user_id,
        lines: lines
            .into_iter()
            .map(|(product_id, quantity)| OrderLine {
                product_id,
                quantity,
            })
            .collect(),
        voucher_code,
        payment_method: PaymentMethod::Cod,
        shipping_name: "Test Customer".to_string(),
        shipping_phone: "0900000000".to_string(),
        shipping_address: "1 Test Street".to_string(),
        note: None,
    }
}
