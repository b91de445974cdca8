//! Category data repository.
//!
//! Categories form a tree through `parent_id`. The repository exposes the lookups the
//! service needs to keep that tree valid: existence, child counts and the parent of a
//! given node.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::{
        category::{Category, CategoryFilter, CreateCategoryParam, UpdateCategoryParam},
        pagination::{PageRequest, Paginated},
    },
    util::slug::SlugStore,
};

pub struct CategoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a category under an already resolved, unique `slug`.
    pub async fn create(
        &self,
        param: CreateCategoryParam,
        slug: String,
    ) -> Result<Category, AppError> {
        let now = Utc::now();
        let entity = entity::category::ActiveModel {
            name: ActiveValue::Set(param.name),
            slug: ActiveValue::Set(slug),
            description: ActiveValue::Set(param.description),
            parent_id: ActiveValue::Set(param.parent_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Category::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Category>, AppError> {
        let entity = entity::prelude::Category::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Category::from_entity))
    }

    /// Loads every category whose id is in `ids`, in no particular order.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Category>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Category::find()
            .filter(entity::category::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Category::from_entity).collect())
    }

    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::Category::find()
            .filter(entity::category::Column::Id.eq(id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Parent of category `id`, or `None` for a root or unknown category.
    pub async fn parent_of(&self, id: i32) -> Result<Option<i32>, AppError> {
        let parent = entity::prelude::Category::find_by_id(id)
            .select_only()
            .column(entity::category::Column::ParentId)
            .into_tuple::<Option<i32>>()
            .one(self.db)
            .await?;

        Ok(parent.flatten())
    }

    pub async fn name_taken(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, AppError> {
        let mut query =
            entity::prelude::Category::find().filter(entity::category::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(entity::category::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    pub async fn count_children(&self, id: i32) -> Result<u64, AppError> {
        let count = entity::prelude::Category::find()
            .filter(entity::category::Column::ParentId.eq(id))
            .count(self.db)
            .await?;

        Ok(count)
    }

    pub async fn update(
        &self,
        id: i32,
        param: UpdateCategoryParam,
    ) -> Result<Option<Category>, AppError> {
        let Some(entity) = entity::prelude::Category::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::category::ActiveModel = entity.into();
        if let Some(name) = param.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = param.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(parent_id) = param.parent_id {
            active.parent_id = ActiveValue::Set(Some(parent_id));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Category::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Category::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists categories alphabetically.
    pub async fn list(
        &self,
        filter: CategoryFilter,
        page: PageRequest,
    ) -> Result<Paginated<Category>, AppError> {
        let mut query = entity::prelude::Category::find();
        if let Some(parent_id) = filter.parent_id {
            query = query.filter(entity::category::Column::ParentId.eq(parent_id));
        }
        if let Some(search) = filter.search {
            query = query.filter(entity::category::Column::Name.contains(&search));
        }

        let paginator = query
            .order_by_asc(entity::category::Column::Name)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let categories = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Category::from_entity)
            .collect();

        Ok(Paginated::new(categories, page, total))
    }
}

impl<C: ConnectionTrait> SlugStore for CategoryRepository<'_, C> {
    async fn slug_taken(&self, slug: &str) -> Result<bool, AppError> {
        let count = entity::prelude::Category::find()
            .filter(entity::category::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
