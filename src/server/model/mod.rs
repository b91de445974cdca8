//! Domain models and operation-specific parameter types.
//!
//! Domain models are built from SeaORM entities at the repository boundary (`from_entity`)
//! and converted to API DTOs at the controller boundary (`into_dto`). Parameter structs
//! carry validated input from controllers into services (`from_dto`).

pub mod activity;
pub mod advertisement;
pub mod brand;
pub mod category;
pub mod debt;
pub mod delivery;
pub mod homepage;
pub mod inventory;
pub mod invoice;
pub mod news;
pub mod notification;
pub mod order;
pub mod pagination;
pub mod product;
pub mod translation;
pub mod user;
pub mod voucher;
