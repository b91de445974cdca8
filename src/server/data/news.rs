//! News article repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::{
        news::{CreateNewsParam, News, UpdateNewsParam},
        pagination::{PageRequest, Paginated},
    },
    util::slug::SlugStore,
};

pub struct NewsRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NewsRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        param: CreateNewsParam,
        slug: String,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<News, AppError> {
        let now = Utc::now();
        let entity = entity::news::ActiveModel {
            title: ActiveValue::Set(param.title),
            slug: ActiveValue::Set(slug),
            summary: ActiveValue::Set(param.summary),
            content: ActiveValue::Set(param.content),
            cover_image_url: ActiveValue::Set(param.cover_image_url),
            published: ActiveValue::Set(param.published),
            published_at: ActiveValue::Set(published_at),
            author_id: ActiveValue::Set(param.author_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(News::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<News>, AppError> {
        let entity = entity::prelude::News::find_by_id(id).one(self.db).await?;

        Ok(entity.map(News::from_entity))
    }

    pub async fn find_published_by_slug(&self, slug: &str) -> Result<Option<News>, AppError> {
        let entity = entity::prelude::News::find()
            .filter(entity::news::Column::Slug.eq(slug))
            .filter(entity::news::Column::Published.eq(true))
            .one(self.db)
            .await?;

        Ok(entity.map(News::from_entity))
    }

    pub async fn update(&self, id: i32, param: UpdateNewsParam) -> Result<Option<News>, AppError> {
        let Some(entity) = entity::prelude::News::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::news::ActiveModel = entity.into();
        if let Some(title) = param.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(summary) = param.summary {
            active.summary = ActiveValue::Set(Some(summary));
        }
        if let Some(content) = param.content {
            active.content = ActiveValue::Set(content);
        }
        if let Some(cover_image_url) = param.cover_image_url {
            active.cover_image_url = ActiveValue::Set(Some(cover_image_url));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(News::from_entity(active.update(self.db).await?)))
    }

    pub async fn set_published(
        &self,
        id: i32,
        published: bool,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<Option<News>, AppError> {
        let Some(entity) = entity::prelude::News::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::news::ActiveModel = entity.into();
        active.published = ActiveValue::Set(published);
        active.published_at = ActiveValue::Set(published_at);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(News::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::News::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists articles. Published-only listings sort by publication date, the admin
    /// listing by creation date; both newest first.
    pub async fn list(
        &self,
        search: Option<String>,
        published_only: bool,
        page: PageRequest,
    ) -> Result<Paginated<News>, AppError> {
        let mut query = entity::prelude::News::find();
        if let Some(search) = search {
            query = query.filter(entity::news::Column::Title.contains(&search));
        }
        query = if published_only {
            query
                .filter(entity::news::Column::Published.eq(true))
                .order_by_desc(entity::news::Column::PublishedAt)
        } else {
            query.order_by_desc(entity::news::Column::CreatedAt)
        };

        let paginator = query
            .order_by_desc(entity::news::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let articles = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(News::from_entity)
            .collect();

        Ok(Paginated::new(articles, page, total))
    }

    /// The `limit` most recently published articles.
    pub async fn latest_published(&self, limit: u64) -> Result<Vec<News>, AppError> {
        let entities = entity::prelude::News::find()
            .filter(entity::news::Column::Published.eq(true))
            .order_by_desc(entity::news::Column::PublishedAt)
            .order_by_desc(entity::news::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(News::from_entity).collect())
    }
}

impl<C: ConnectionTrait> SlugStore for NewsRepository<'_, C> {
    async fn slug_taken(&self, slug: &str) -> Result<bool, AppError> {
        let count = entity::prelude::News::find()
            .filter(entity::news::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
