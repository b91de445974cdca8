//! HTTP request handlers.
//!
//! Each module groups the endpoints of one resource. Handlers check access with
//! [`AuthGuard`](crate::server::middleware::auth::AuthGuard), convert DTOs into
//! params, call a service and wrap the result in an
//! [`ApiResponse`](crate::model::api::ApiResponse).

pub mod activity;
pub mod advertisement;
pub mod auth;
pub mod brand;
pub mod category;
pub mod dashboard;
pub mod debt;
pub mod delivery;
pub mod extract;
pub mod homepage;
pub mod inventory;
pub mod invoice;
pub mod news;
pub mod notification;
pub mod order;
pub mod product;
pub mod translation;
pub mod user;
pub mod voucher;
