use sea_orm::DatabaseConnection;

use crate::server::{
    cache::ResponseCache,
    data::{category::CategoryRepository, product::ProductRepository},
    error::AppError,
    model::{
        category::{Category, CategoryFilter, CreateCategoryParam, UpdateCategoryParam},
        pagination::{PageRequest, Paginated},
    },
    util::slug::unique_slug,
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    pub async fn list(
        &self,
        filter: CategoryFilter,
        page: PageRequest,
    ) -> Result<Paginated<Category>, AppError> {
        CategoryRepository::new(self.db).list(filter, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Category, AppError> {
        CategoryRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category"))
    }

    /// Creates a category, optionally under an existing parent.
    pub async fn create(&self, param: CreateCategoryParam) -> Result<Category, AppError> {
        if param.name.is_empty() {
            return Err(AppError::BadRequest("Category name is required".to_string()));
        }

        let repo = CategoryRepository::new(self.db);
        if repo.name_taken(&param.name, None).await? {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                param.name
            )));
        }
        if let Some(parent_id) = param.parent_id {
            if !repo.exists(parent_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Parent category {} does not exist",
                    parent_id
                )));
            }
        }

        let source = param.slug.clone().unwrap_or_else(|| param.name.clone());
        let slug = unique_slug(&repo, &source, "category").await?;

        let category = repo.create(param, slug).await?;
        self.invalidate().await;

        Ok(category)
    }

    /// Updates a category. A new parent must exist and must not be the category itself
    /// or one of its descendants.
    pub async fn update(&self, id: i32, param: UpdateCategoryParam) -> Result<Category, AppError> {
        let repo = CategoryRepository::new(self.db);
        if !repo.exists(id).await? {
            return Err(AppError::not_found("Category"));
        }

        if let Some(name) = param.name.as_deref() {
            if name.is_empty() {
                return Err(AppError::BadRequest("Category name cannot be empty".to_string()));
            }
            if repo.name_taken(name, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "Category '{}' already exists",
                    name
                )));
            }
        }

        if let Some(parent_id) = param.parent_id {
            self.check_parent(&repo, id, parent_id).await?;
        }

        let category = repo
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::not_found("Category"))?;
        self.invalidate().await;

        Ok(category)
    }

    /// Deletes a category with no products and no child categories.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let repo = CategoryRepository::new(self.db);
        if !repo.exists(id).await? {
            return Err(AppError::not_found("Category"));
        }

        if repo.count_children(id).await? > 0 {
            return Err(AppError::Conflict(
                "Category has child categories".to_string(),
            ));
        }
        if ProductRepository::new(self.db).count_by_category(id).await? > 0 {
            return Err(AppError::Conflict("Category has products".to_string()));
        }

        repo.delete(id).await?;
        self.invalidate().await;

        Ok(())
    }

    /// Walks up from `parent_id`; reaching `id` would close a cycle.
    async fn check_parent(
        &self,
        repo: &CategoryRepository<'_, DatabaseConnection>,
        id: i32,
        parent_id: i32,
    ) -> Result<(), AppError> {
        if parent_id == id {
            return Err(AppError::BadRequest(
                "A category cannot be its own parent".to_string(),
            ));
        }
        if !repo.exists(parent_id).await? {
            return Err(AppError::BadRequest(format!(
                "Parent category {} does not exist",
                parent_id
            )));
        }

        let mut current = repo.parent_of(parent_id).await?;
        while let Some(ancestor) = current {
            if ancestor == id {
                return Err(AppError::BadRequest(
                    "A category cannot be moved under its own descendant".to_string(),
                ));
            }
            current = repo.parent_of(ancestor).await?;
        }

        Ok(())
    }

    async fn invalidate(&self) {
        self.cache.invalidate_product_pages();
        self.cache.invalidate_homepage().await;
    }
}
