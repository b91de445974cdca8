use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    activity::ActivityDto, advertisement::AdvertisementDto, category::CategoryDto, news::NewsDto,
    product::ProductDto,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomepageConfigDto {
    pub hero_title: String,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    pub featured_product_ids: Vec<i32>,
    pub featured_category_ids: Vec<i32>,
    /// Absent until the homepage has been saved once
    pub updated_at: Option<DateTime<Utc>>,
}

/// Everything the storefront needs to render its landing page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomepageDto {
    pub config: HomepageConfigDto,
    pub featured_products: Vec<ProductDto>,
    pub featured_categories: Vec<CategoryDto>,
    pub banners: Vec<AdvertisementDto>,
    pub latest_news: Vec<NewsDto>,
    pub activities: Vec<ActivityDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateHomepageDto {
    pub hero_title: String,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    #[serde(default)]
    pub featured_product_ids: Vec<i32>,
    #[serde(default)]
    pub featured_category_ids: Vec<i32>,
}
