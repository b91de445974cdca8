use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::string_enum;

string_enum! {
    /// Ordering applied to product listings.
    pub enum ProductSort {
        Newest => "newest",
        Oldest => "oldest",
        PriceAsc => "price_asc",
        PriceDesc => "price_desc",
        Name => "name",
    }
}

impl Default for ProductSort {
    fn default() -> Self {
        ProductSort::Newest
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub description: Option<String>,
    pub price: i64,
    pub sale_price: Option<i64>,
    /// `sale_price` when set, otherwise `price`
    pub effective_price: i64,
    pub stock: i32,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductDto {
    pub name: String,
    pub slug: Option<String>,
    pub sku: String,
    pub description: Option<String>,
    pub price: i64,
    pub sale_price: Option<i64>,
    #[serde(default)]
    pub stock: i32,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Partial update. Stock is changed through inventory movements only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductDto {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub sale_price: Option<i64>,
    /// Removes the sale price when true
    #[serde(default)]
    pub clear_sale_price: bool,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Matches name or SKU
    pub search: Option<String>,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    /// Lower bound on the effective price
    pub min_price: Option<i64>,
    /// Upper bound on the effective price
    pub max_price: Option<i64>,
    pub sort: Option<ProductSort>,
    /// Admin listing only
    pub active: Option<bool>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn default_true() -> bool {
    true
}
