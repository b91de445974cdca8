//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction. It holds:
//! - Database connection pool for data persistence
//! - Response cache for hot public reads
//! - Shop settings (shipping fee, thresholds) used by order and inventory rules

use sea_orm::DatabaseConnection;

use crate::server::{cache::ResponseCache, config::ShopSettings};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: `DatabaseConnection` is a pool handle, the cache
/// is reference-counted internally and `ShopSettings` is `Copy`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// In-memory cache for product listings, homepage and translation bundles.
    pub cache: ResponseCache,

    pub shop: ShopSettings,
}

impl AppState {
    pub fn new(db: DatabaseConnection, cache: ResponseCache, shop: ShopSettings) -> Self {
        Self { db, cache, shop }
    }
}
