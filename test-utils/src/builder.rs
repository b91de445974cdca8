use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Product};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Product)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. The table will be created when `build()` is called.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the catalog tables: Brand, Category, Product and InventoryMovement.
    pub fn with_catalog_tables(self) -> Self {
        self.with_table(Brand)
            .with_table(Category)
            .with_table(Product)
            .with_table(InventoryMovement)
    }

    /// Adds every table needed to place and manage orders.
    ///
    /// Includes User, the catalog tables, vouchers and their usages, orders, order
    /// items and notifications (order events notify the customer).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_order_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_order_tables(self) -> Self {
        self.with_table(User)
            .with_catalog_tables()
            .with_table(Voucher)
            .with_table(VoucherUsage)
            .with_table(Order)
            .with_table(OrderItem)
            .with_table(Notification)
    }

    /// Adds order tables plus delivery, invoice and debt tables.
    pub fn with_billing_tables(self) -> Self {
        self.with_order_tables()
            .with_table(Delivery)
            .with_table(DeliveryEvent)
            .with_table(Invoice)
            .with_table(InvoiceOrder)
            .with_table(Debt)
            .with_table(DebtItem)
            .with_table(DebtPayment)
    }

    /// Adds the admin content tables: News, Activity, Advertisement and Homepage.
    pub fn with_content_tables(self) -> Self {
        self.with_table(News)
            .with_table(Activity)
            .with_table(Advertisement)
            .with_table(Homepage)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
