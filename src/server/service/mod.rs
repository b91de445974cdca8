//! Service layer for business logic and orchestration.
//!
//! Services sit between the controller (API) layer and the data (repository) layer.
//! They are responsible for:
//!
//! - **Business Logic**: Validation, status machines and pricing rules
//! - **Orchestration**: Coordinating several repositories inside one DB transaction
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Cache Invalidation**: Dropping cached public reads after a committed write
//!
//! Cross-service helpers that must run inside a caller's transaction are free
//! functions generic over `ConnectionTrait`: [`order::apply_transition`],
//! [`voucher::evaluate`] and [`notification::notify`].

pub mod activity;
pub mod advertisement;
pub mod auth;
pub mod brand;
pub mod category;
pub mod dashboard;
pub mod debt;
pub mod delivery;
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

#[cfg(test)]
mod test;
