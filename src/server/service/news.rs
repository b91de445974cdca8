use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    cache::ResponseCache,
    data::news::NewsRepository,
    error::AppError,
    model::{
        news::{publication_date, CreateNewsParam, News, UpdateNewsParam},
        pagination::{PageRequest, Paginated},
    },
    util::slug::unique_slug,
};

pub struct NewsService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> NewsService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    /// Lists articles; the public listing passes `published_only`.
    pub async fn list(
        &self,
        search: Option<String>,
        published_only: bool,
        page: PageRequest,
    ) -> Result<Paginated<News>, AppError> {
        let search = search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        NewsRepository::new(self.db)
            .list(search, published_only, page)
            .await
    }

    pub async fn get(&self, id: i32) -> Result<News, AppError> {
        NewsRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("News"))
    }

    pub async fn get_published_by_slug(&self, slug: &str) -> Result<News, AppError> {
        NewsRepository::new(self.db)
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("News"))
    }

    pub async fn create(&self, param: CreateNewsParam) -> Result<News, AppError> {
        if param.title.is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        if param.content.trim().is_empty() {
            return Err(AppError::BadRequest("Content is required".to_string()));
        }

        let repo = NewsRepository::new(self.db);
        let source = param.slug.clone().unwrap_or_else(|| param.title.clone());
        let slug = unique_slug(&repo, &source, "news").await?;
        let published_at = publication_date(param.published, None, Utc::now());

        let news = repo.create(param, slug, published_at).await?;
        if news.published {
            self.cache.invalidate_homepage().await;
        }

        tracing::info!(news_id = news.id, slug = %news.slug, "Created news article");

        Ok(news)
    }

    pub async fn update(&self, id: i32, param: UpdateNewsParam) -> Result<News, AppError> {
        if param.title.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::BadRequest("Title cannot be empty".to_string()));
        }

        let news = NewsRepository::new(self.db)
            .update(id, param)
            .await?
            .ok_or_else(|| AppError::not_found("News"))?;
        if news.published {
            self.cache.invalidate_homepage().await;
        }

        Ok(news)
    }

    /// Publishes or unpublishes. `published_at` is kept from the first publication.
    pub async fn set_published(&self, id: i32, published: bool) -> Result<News, AppError> {
        let repo = NewsRepository::new(self.db);
        let current = self.get(id).await?;

        let published_at = publication_date(published, current.published_at, Utc::now());
        let news = repo
            .set_published(id, published, published_at)
            .await?
            .ok_or_else(|| AppError::not_found("News"))?;
        self.cache.invalidate_homepage().await;

        tracing::info!(news_id = id, published, "Changed news publication");

        Ok(news)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !NewsRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found("News"));
        }
        self.cache.invalidate_homepage().await;

        Ok(())
    }
}
