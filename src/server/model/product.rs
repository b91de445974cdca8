//! Product domain model, parameters and listing filter.

use chrono::{DateTime, Utc};

use crate::model::product::{
    CreateProductDto, ProductDto, ProductQuery, ProductSort, UpdateProductDto,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub description: Option<String>,
    pub price: i64,
    pub sale_price: Option<i64>,
    pub stock: i32,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price a customer pays per unit: the sale price when set, otherwise the list price.
    pub fn effective_price(&self) -> i64 {
        self.sale_price.unwrap_or(self.price)
    }

    pub fn from_entity(entity: entity::product::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            sku: entity.sku,
            description: entity.description,
            price: entity.price,
            sale_price: entity.sale_price,
            stock: entity.stock,
            brand_id: entity.brand_id,
            category_id: entity.category_id,
            image_url: entity.image_url,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ProductDto {
        ProductDto {
            effective_price: self.effective_price(),
            id: self.id,
            name: self.name,
            slug: self.slug,
            sku: self.sku,
            description: self.description,
            price: self.price,
            sale_price: self.sale_price,
            stock: self.stock,
            brand_id: self.brand_id,
            category_id: self.category_id,
            image_url: self.image_url,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Checks the price pair: `price > 0` and, when set, `0 < sale_price < price`.
pub fn validate_prices(price: i64, sale_price: Option<i64>) -> Result<(), String> {
    if price <= 0 {
        return Err("Price must be greater than 0".to_string());
    }
    if let Some(sale) = sale_price {
        if sale <= 0 || sale >= price {
            return Err("Sale price must be greater than 0 and less than price".to_string());
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CreateProductParam {
    pub name: String,
    pub slug: Option<String>,
    pub sku: String,
    pub description: Option<String>,
    pub price: i64,
    pub sale_price: Option<i64>,
    pub stock: i32,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub active: bool,
}

impl CreateProductParam {
    pub fn from_dto(dto: CreateProductDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            slug: dto.slug,
            sku: dto.sku.trim().to_string(),
            description: dto.description,
            price: dto.price,
            sale_price: dto.sale_price,
            stock: dto.stock,
            brand_id: dto.brand_id,
            category_id: dto.category_id,
            image_url: dto.image_url,
            active: dto.active,
        }
    }
}

/// Partial product update. `sale_price` of `Some(None)` clears the sale price.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductParam {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub sale_price: Option<Option<i64>>,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub active: Option<bool>,
}

impl UpdateProductParam {
    pub fn from_dto(dto: UpdateProductDto) -> Self {
        let sale_price = if dto.clear_sale_price {
            Some(None)
        } else {
            dto.sale_price.map(Some)
        };

        Self {
            name: dto.name.map(|n| n.trim().to_string()),
            sku: dto.sku.map(|s| s.trim().to_string()),
            description: dto.description,
            price: dto.price,
            sale_price,
            brand_id: dto.brand_id,
            category_id: dto.category_id,
            image_url: dto.image_url,
            active: dto.active,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub brand_id: Option<i32>,
    pub category_id: Option<i32>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort: ProductSort,
    /// `None` lists both active and inactive products.
    pub active: Option<bool>,
}

impl ProductFilter {
    pub fn from_query(query: &ProductQuery) -> Self {
        Self {
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            brand_id: query.brand_id,
            category_id: query.category_id,
            min_price: query.min_price,
            max_price: query.max_price,
            sort: query.sort.unwrap_or_default(),
            active: query.active,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_valid_prices() {
        assert!(validate_prices(100, None).is_ok());
        assert!(validate_prices(100, Some(99)).is_ok());
    }

    #[test]
    fn rejects_non_positive_price() {
        assert!(validate_prices(0, None).is_err());
    }

    #[test]
    fn rejects_sale_price_not_below_price() {
        assert!(validate_prices(100, Some(100)).is_err());
        assert!(validate_prices(100, Some(0)).is_err());
    }

    #[test]
    fn update_can_clear_sale_price() {
        let param = UpdateProductParam::from_dto(UpdateProductDto {
            clear_sale_price: true,
            sale_price: Some(50),
            ..Default::default()
        });

        assert_eq!(param.sale_price, Some(None));
    }
}
