//! SeaORM entity definitions for the back office database.
//!
//! One module per table. Status-like columns are stored as lowercase strings and
//! parsed into domain enums by the server's repository layer.

pub mod prelude;

pub mod activity;
pub mod advertisement;
pub mod brand;
pub mod category;
pub mod debt;
pub mod debt_item;
pub mod debt_payment;
pub mod delivery;
pub mod delivery_event;
pub mod homepage;
pub mod inventory_movement;
pub mod invoice;
pub mod invoice_order;
pub mod news;
pub mod notification;
pub mod order;
pub mod order_item;
pub mod product;
pub mod translation;
pub mod user;
pub mod voucher;
pub mod voucher_usage;
