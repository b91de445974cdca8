//! Storefront homepage composition.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::{advertisement::AdPosition, homepage::HomepageDto},
    server::{
        cache::{CacheKey, CacheValue, ResponseCache},
        data::{
            activity::ActivityRepository, advertisement::AdvertisementRepository,
            category::CategoryRepository, homepage::HomepageRepository, news::NewsRepository,
            product::ProductRepository,
        },
        error::AppError,
        model::{
            activity::Activity,
            advertisement::Advertisement,
            category::Category,
            homepage::{order_by_ids, HomepageConfig, UpdateHomepageParam},
            news::News,
            product::Product,
        },
    },
};

const LATEST_NEWS: u64 = 3;
const MAX_ACTIVITIES: u64 = 5;

pub struct HomepageService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> HomepageService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    /// The saved configuration, or defaults when none was saved yet.
    pub async fn config(&self) -> Result<HomepageConfig, AppError> {
        Ok(HomepageRepository::new(self.db)
            .get()
            .await?
            .unwrap_or_default())
    }

    /// The composed public homepage, cached until the next write that affects it.
    pub async fn get(&self) -> Result<HomepageDto, AppError> {
        if let Some(CacheValue::Homepage(dto)) = self.cache.get(&CacheKey::Homepage).await {
            return Ok(*dto);
        }

        let config = self.config().await?;
        let now = Utc::now();

        let products: Vec<Product> = ProductRepository::new(self.db)
            .find_by_ids(&config.featured_product_ids)
            .await?
            .into_iter()
            .filter(|p| p.active)
            .collect();
        let categories = CategoryRepository::new(self.db)
            .find_by_ids(&config.featured_category_ids)
            .await?;
        let banners = AdvertisementRepository::new(self.db)
            .running(Some(AdPosition::HomeBanner), now)
            .await?;
        let latest_news = NewsRepository::new(self.db)
            .latest_published(LATEST_NEWS)
            .await?;
        let activities = ActivityRepository::new(self.db)
            .current_and_upcoming(now, MAX_ACTIVITIES)
            .await?;

        let featured_products = order_by_ids(&config.featured_product_ids, products, |p| p.id);
        let featured_categories =
            order_by_ids(&config.featured_category_ids, categories, |c| c.id);

        let dto = HomepageDto {
            config: config.into_dto(),
            featured_products: featured_products
                .into_iter()
                .map(Product::into_dto)
                .collect(),
            featured_categories: featured_categories
                .into_iter()
                .map(Category::into_dto)
                .collect(),
            banners: banners.into_iter().map(Advertisement::into_dto).collect(),
            latest_news: latest_news.into_iter().map(News::into_dto).collect(),
            activities: activities
                .into_iter()
                .map(|a: Activity| a.into_dto(now))
                .collect(),
        };

        self.cache
            .insert(CacheKey::Homepage, CacheValue::Homepage(Box::new(dto.clone())))
            .await;

        Ok(dto)
    }

    /// Saves the homepage. Every featured id must exist.
    ///
    /// # Returns
    /// - `Ok(HomepageConfig)` - The saved configuration
    /// - `Err(AppError::BadRequest)` - Empty title, or unknown product or category ids
    pub async fn update(&self, param: UpdateHomepageParam) -> Result<HomepageConfig, AppError> {
        if param.hero_title.is_empty() {
            return Err(AppError::BadRequest("Hero title is required".to_string()));
        }

        let products = ProductRepository::new(self.db)
            .find_by_ids(&param.featured_product_ids)
            .await?;
        let unknown: Vec<i32> = param
            .featured_product_ids
            .iter()
            .copied()
            .filter(|id| !products.iter().any(|p| p.id == *id))
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Unknown product ids: {:?}",
                unknown
            )));
        }

        let categories = CategoryRepository::new(self.db)
            .find_by_ids(&param.featured_category_ids)
            .await?;
        let unknown: Vec<i32> = param
            .featured_category_ids
            .iter()
            .copied()
            .filter(|id| !categories.iter().any(|c| c.id == *id))
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Unknown category ids: {:?}",
                unknown
            )));
        }

        let config = HomepageRepository::new(self.db).upsert(param).await?;
        self.cache.invalidate_homepage().await;

        tracing::info!("Updated homepage");

        Ok(config)
    }
}
