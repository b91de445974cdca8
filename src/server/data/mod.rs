//! Database repository layer for all domain entities.
//!
//! Each repository wraps SeaORM queries for one domain and converts entity models into
//! domain models at the boundary. Repositories are generic over `ConnectionTrait` so the
//! same code runs against the pool or inside a transaction opened by a service.

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
pub mod product;
pub mod translation;
pub mod user;
pub mod voucher;

#[cfg(test)]
mod test;
