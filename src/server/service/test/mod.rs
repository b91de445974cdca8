use std::time::Duration;

use crate::server::cache::ResponseCache;

mod auth;
mod brand;
mod category;
mod dashboard;
mod debt;
mod delivery;
mod homepage;
mod inventory;
mod invoice;
mod news;
mod notification;
mod order;
mod product;
mod voucher;

fn test_cache() -> ResponseCache {
    ResponseCache::new(Duration::from_secs(60))
}
