//! Product catalog service.
//!
//! Public reads go through the response cache; every write invalidates the product's
//! cached entry and all cached listing pages. Stock is never written here, only by
//! the inventory and order services.

use sea_orm::DatabaseConnection;

use crate::{
    model::product::{ProductDto, ProductQuery},
    server::{
        cache::{CacheKey, CacheValue, ResponseCache},
        data::{
            brand::BrandRepository, category::CategoryRepository, order::OrderRepository,
            product::ProductRepository,
        },
        error::AppError,
        model::{
            pagination::{PageRequest, Paginated},
            product::{
                validate_prices, CreateProductParam, Product, ProductFilter, UpdateProductParam,
            },
        },
        util::slug::unique_slug,
    },
};

pub struct ProductService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> ProductService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    /// Public listing of active products, cached per normalized query.
    pub async fn list_public(&self, query: ProductQuery) -> Result<Paginated<ProductDto>, AppError> {
        let page = PageRequest::new(query.page, query.limit);
        let normalized = ProductQuery {
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            sort: Some(query.sort.unwrap_or_default()),
            active: None,
            page: Some(page.page),
            limit: Some(page.limit),
            ..query
        };

        let key = CacheKey::ProductPage(normalized.clone());
        if let Some(CacheValue::ProductPage(items, pagination)) = self.cache.get(&key).await {
            return Ok(Paginated {
                items,
                page: pagination.page,
                limit: pagination.limit,
                total: pagination.total,
            });
        }

        let filter = ProductFilter {
            active: Some(true),
            ..ProductFilter::from_query(&normalized)
        };
        let products = ProductRepository::new(self.db)
            .list(filter, page)
            .await?
            .map(Product::into_dto);

        self.cache
            .insert(
                key,
                CacheValue::ProductPage(products.items.clone(), products.pagination()),
            )
            .await;

        Ok(products)
    }

    /// Public product by id; inactive products are reported as missing.
    pub async fn get_public(&self, id: i32) -> Result<ProductDto, AppError> {
        let key = CacheKey::Product(id);

        let product = match self.cache.get(&key).await {
            Some(CacheValue::Product(dto)) => *dto,
            _ => {
                let dto = self.get(id).await?.into_dto();
                self.cache
                    .insert(key, CacheValue::Product(Box::new(dto.clone())))
                    .await;
                dto
            }
        };

        if !product.active {
            return Err(AppError::not_found("Product"));
        }

        Ok(product)
    }

    pub async fn get_public_by_slug(&self, slug: &str) -> Result<Product, AppError> {
        ProductRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .filter(|p| p.active)
            .ok_or_else(|| AppError::not_found("Product"))
    }

    /// Admin listing; includes inactive products unless filtered.
    pub async fn list(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Paginated<Product>, AppError> {
        ProductRepository::new(self.db).list(filter, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Product, AppError> {
        ProductRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))
    }

    /// Creates a product after validating prices, stock, references and SKU.
    pub async fn create(&self, param: CreateProductParam) -> Result<Product, AppError> {
        if param.name.is_empty() {
            return Err(AppError::BadRequest("Product name is required".to_string()));
        }
        if param.sku.is_empty() {
            return Err(AppError::BadRequest("SKU is required".to_string()));
        }
        validate_prices(param.price, param.sale_price).map_err(AppError::BadRequest)?;
        if param.stock < 0 {
            return Err(AppError::BadRequest("Stock cannot be negative".to_string()));
        }
        self.check_references(param.brand_id, param.category_id)
            .await?;

        let repo = ProductRepository::new(self.db);
        if repo.sku_taken(&param.sku, None).await? {
            return Err(AppError::Conflict(format!(
                "SKU '{}' is already in use",
                param.sku
            )));
        }

        let source = param.slug.clone().unwrap_or_else(|| param.name.clone());
        let slug = unique_slug(&repo, &source, "product").await?;

        let product = repo.create(param, slug).await?;
        self.cache.invalidate_product_pages();

        tracing::info!(product_id = product.id, sku = %product.sku, "Created product");

        Ok(product)
    }

    /// Applies a partial update. Prices are validated as they will be stored.
    pub async fn update(&self, id: i32, param: UpdateProductParam) -> Result<Product, AppError> {
        let repo = ProductRepository::new(self.db);
        let current = self.get(id).await?;

        if param.name.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::BadRequest("Product name cannot be empty".to_string()));
        }
        if let Some(sku) = param.sku.as_deref() {
            if sku.is_empty() {
                return Err(AppError::BadRequest("SKU cannot be empty".to_string()));
            }
            if repo.sku_taken(sku, Some(id)).await? {
                return Err(AppError::Conflict(format!("SKU '{}' is already in use", sku)));
            }
        }

        let price = param.price.unwrap_or(current.price);
        let sale_price = param.sale_price.unwrap_or(current.sale_price);
        validate_prices(price, sale_price).map_err(AppError::BadRequest)?;

        self.check_references(param.brand_id, param.category_id)
            .await?;

        let product = repo
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))?;
        self.cache.invalidate_product(id).await;

        Ok(product)
    }

    /// Deletes a product that no order references.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let repo = ProductRepository::new(self.db);
        self.get(id).await?;

        if OrderRepository::new(self.db).product_is_ordered(id).await? {
            return Err(AppError::Conflict(
                "Product has been ordered; deactivate it instead".to_string(),
            ));
        }

        repo.delete(id).await?;
        self.cache.invalidate_product(id).await;

        Ok(())
    }

    async fn check_references(
        &self,
        brand_id: Option<i32>,
        category_id: Option<i32>,
    ) -> Result<(), AppError> {
        if let Some(brand_id) = brand_id {
            if !BrandRepository::new(self.db).exists(brand_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Brand {} does not exist",
                    brand_id
                )));
            }
        }
        if let Some(category_id) = category_id {
            if !CategoryRepository::new(self.db).exists(category_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Category {} does not exist",
                    category_id
                )));
            }
        }
        Ok(())
    }
}
