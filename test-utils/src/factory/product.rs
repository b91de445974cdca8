//! Product factory for creating catalog entries.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test products.
///
/// # Example
///
/// ```rust,ignore
/// let product = ProductFactory::new(&db)
///     .price(200_000)
///     .sale_price(Some(150_000))
///     .stock(2)
///     .build()
///     .await?;
/// ```
pub struct ProductFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    slug: String,
    sku: String,
    price: i64,
    sale_price: Option<i64>,
    stock: i32,
    brand_id: Option<i32>,
    category_id: Option<i32>,
    active: bool,
}

impl<'a> ProductFactory<'a> {
    /// Creates a new ProductFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Product {id}"`, sku: `"SKU-{id}"`
    /// - price: `100_000`, no sale price
    /// - stock: `10`, active, no brand or category
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Product {}", id),
            slug: format!("product-{}", id),
            sku: format!("SKU-{}", id),
            price: 100_000,
            sale_price: None,
            stock: 10,
            brand_id: None,
            category_id: None,
            active: true,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn price(mut self, price: i64) -> Self {
        self.price = price;
        self
    }

    pub fn sale_price(mut self, sale_price: Option<i64>) -> Self {
        self.sale_price = sale_price;
        self
    }

    pub fn stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    pub fn brand_id(mut self, brand_id: i32) -> Self {
        self.brand_id = Some(brand_id);
        self
    }

    pub fn category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub async fn build(self) -> Result<entity::product::Model, DbErr> {
        let now = Utc::now();
        entity::product::ActiveModel {
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            sku: ActiveValue::Set(self.sku),
            description: ActiveValue::Set(None),
            price: ActiveValue::Set(self.price),
            sale_price: ActiveValue::Set(self.sale_price),
            stock: ActiveValue::Set(self.stock),
            brand_id: ActiveValue::Set(self.brand_id),
            category_id: ActiveValue::Set(self.category_id),
            image_url: ActiveValue::Set(None),
            active: ActiveValue::Set(self.active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active product priced at 100 000 with 10 units in stock.
pub async fn create_product(db: &DatabaseConnection) -> Result<entity::product::Model, DbErr> {
    ProductFactory::new(db).build().await
}
