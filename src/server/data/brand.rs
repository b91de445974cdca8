//! Brand data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        brand::{Brand, CreateBrandParam, UpdateBrandParam},
        pagination::{PageRequest, Paginated},
    },
    util::slug::SlugStore,
};

pub struct BrandRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BrandRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a brand under an already resolved, unique `slug`.
    pub async fn create(&self, param: CreateBrandParam, slug: String) -> Result<Brand, AppError> {
        let now = Utc::now();
        let entity = entity::brand::ActiveModel {
            name: ActiveValue::Set(param.name),
            slug: ActiveValue::Set(slug),
            description: ActiveValue::Set(param.description),
            logo_url: ActiveValue::Set(param.logo_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Brand::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Brand>, AppError> {
        let entity = entity::prelude::Brand::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Brand::from_entity))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::Brand::find()
            .filter(entity::brand::Column::Id.eq(id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Whether another brand already uses `name`, ignoring `exclude_id`.
    pub async fn name_taken(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, AppError> {
        let mut query = entity::prelude::Brand::find().filter(entity::brand::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(entity::brand::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(Brand))` - The updated brand
    /// - `Ok(None)` - No brand with that id
    pub async fn update(&self, id: i32, param: UpdateBrandParam) -> Result<Option<Brand>, AppError> {
        let Some(entity) = entity::prelude::Brand::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::brand::ActiveModel = entity.into();
        if let Some(name) = param.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = param.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(logo_url) = param.logo_url {
            active.logo_url = ActiveValue::Set(Some(logo_url));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Brand::from_entity(active.update(self.db).await?)))
    }

    /// Deletes a brand, returning whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Brand::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists brands alphabetically; `search` matches the name.
    pub async fn list(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Paginated<Brand>, AppError> {
        let mut query = entity::prelude::Brand::find();
        if let Some(search) = search {
            query = query.filter(entity::brand::Column::Name.contains(&search));
        }

        let paginator = query
            .order_by_asc(entity::brand::Column::Name)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let brands = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Brand::from_entity)
            .collect();

        Ok(Paginated::new(brands, page, total))
    }
}

impl<C: ConnectionTrait> SlugStore for BrandRepository<'_, C> {
    async fn slug_taken(&self, slug: &str) -> Result<bool, AppError> {
        let count = entity::prelude::Brand::find()
            .filter(entity::brand::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
