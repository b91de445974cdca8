//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Used for emails, slugs, SKUs and codes so that factory-created rows never
/// collide on unique columns.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a customer, an in-stock product and a pending order for one unit of it.
///
/// # Returns
/// - `Ok((customer, product, order))` - Tuple of all created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_order_with_dependencies(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::product::Model,
        entity::order::Model,
    ),
    DbErr,
> {
    let customer = crate::factory::user::create_user(db).await?;
    let product = crate::factory::product::create_product(db).await?;
    let order = crate::factory::order::OrderFactory::new(db, customer.id, &product)
        .build()
        .await?;

    Ok((customer, product, order))
}
