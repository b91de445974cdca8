use sea_orm::DatabaseConnection;

use crate::server::{
    cache::ResponseCache,
    data::{brand::BrandRepository, product::ProductRepository},
    error::AppError,
    model::{
        brand::{Brand, CreateBrandParam, UpdateBrandParam},
        pagination::{PageRequest, Paginated},
    },
    util::slug::unique_slug,
};

pub struct BrandService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> BrandService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    pub async fn list(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Paginated<Brand>, AppError> {
        BrandRepository::new(self.db).list(search, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Brand, AppError> {
        BrandRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Brand"))
    }

    /// Creates a brand; the slug comes from `param.slug` or the name.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Empty name
    /// - `Err(AppError::Conflict)` - Another brand already has this name
    pub async fn create(&self, param: CreateBrandParam) -> Result<Brand, AppError> {
        if param.name.is_empty() {
            return Err(AppError::BadRequest("Brand name is required".to_string()));
        }

        let repo = BrandRepository::new(self.db);
        if repo.name_taken(&param.name, None).await? {
            return Err(AppError::Conflict(format!(
                "Brand '{}' already exists",
                param.name
            )));
        }

        let source = param.slug.clone().unwrap_or_else(|| param.name.clone());
        let slug = unique_slug(&repo, &source, "brand").await?;

        let brand = repo.create(param, slug).await?;
        self.cache.invalidate_product_pages();

        Ok(brand)
    }

    pub async fn update(&self, id: i32, param: UpdateBrandParam) -> Result<Brand, AppError> {
        let repo = BrandRepository::new(self.db);

        if let Some(name) = param.name.as_deref() {
            if name.is_empty() {
                return Err(AppError::BadRequest("Brand name cannot be empty".to_string()));
            }
            if repo.name_taken(name, Some(id)).await? {
                return Err(AppError::Conflict(format!("Brand '{}' already exists", name)));
            }
        }

        let brand = repo
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::not_found("Brand"))?;
        self.cache.invalidate_product_pages();

        Ok(brand)
    }

    /// Deletes a brand that no product references.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let repo = BrandRepository::new(self.db);
        if !repo.exists(id).await? {
            return Err(AppError::not_found("Brand"));
        }

        let products = ProductRepository::new(self.db).count_by_brand(id).await?;
        if products > 0 {
            return Err(AppError::Conflict(format!(
                "Brand is used by {} product(s)",
                products
            )));
        }

        repo.delete(id).await?;
        self.cache.invalidate_product_pages();

        Ok(())
    }
}
