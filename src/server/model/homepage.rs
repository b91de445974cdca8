use chrono::{DateTime, Utc};

use crate::model::homepage::{HomepageConfigDto, UpdateHomepageDto};
use crate::server::{error::AppError, util::parse::parse_id_list};

/// Primary key of the single homepage row.
pub const HOMEPAGE_ID: i32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct HomepageConfig {
    pub hero_title: String,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    pub featured_product_ids: Vec<i32>,
    pub featured_category_ids: Vec<i32>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for HomepageConfig {
    /// Served until an admin saves the homepage for the first time.
    fn default() -> Self {
        Self {
            hero_title: "Welcome".to_string(),
            hero_subtitle: None,
            hero_image_url: None,
            featured_product_ids: Vec::new(),
            featured_category_ids: Vec::new(),
            updated_at: None,
        }
    }
}

impl HomepageConfig {
    pub fn from_entity(entity: entity::homepage::Model) -> Result<Self, AppError> {
        Ok(Self {
            hero_title: entity.hero_title,
            hero_subtitle: entity.hero_subtitle,
            hero_image_url: entity.hero_image_url,
            featured_product_ids: parse_id_list(entity.featured_product_ids)?,
            featured_category_ids: parse_id_list(entity.featured_category_ids)?,
            updated_at: Some(entity.updated_at),
        })
    }

    pub fn into_dto(self) -> HomepageConfigDto {
        HomepageConfigDto {
            hero_title: self.hero_title,
            hero_subtitle: self.hero_subtitle,
            hero_image_url: self.hero_image_url,
            featured_product_ids: self.featured_product_ids,
            featured_category_ids: self.featured_category_ids,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateHomepageParam {
    pub hero_title: String,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    pub featured_product_ids: Vec<i32>,
    pub featured_category_ids: Vec<i32>,
}

impl UpdateHomepageParam {
    /// Drops repeated ids, keeping the first occurrence so the display order holds.
    pub fn from_dto(dto: UpdateHomepageDto) -> Self {
        Self {
            hero_title: dto.hero_title.trim().to_string(),
            hero_subtitle: dto.hero_subtitle,
            hero_image_url: dto.hero_image_url,
            featured_product_ids: dedup_ordered(dto.featured_product_ids),
            featured_category_ids: dedup_ordered(dto.featured_category_ids),
        }
    }
}

fn dedup_ordered(ids: Vec<i32>) -> Vec<i32> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// Reorders `items` to follow `ids`, dropping anything not listed.
pub fn order_by_ids<T>(ids: &[i32], mut items: Vec<T>, id_of: impl Fn(&T) -> i32) -> Vec<T> {
    let mut ordered = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(pos) = items.iter().position(|item| id_of(item) == *id) {
            ordered.push(items.swap_remove(pos));
        }
    }
    ordered
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_has_welcome_title() {
        let config = HomepageConfig::default();

        assert_eq!(config.hero_title, "Welcome");
        assert!(config.updated_at.is_none());
    }

    #[test]
    fn keeps_configured_order() {
        let ordered = order_by_ids(&[3, 1, 9, 2], vec![1, 2, 3], |id| *id);

        assert_eq!(ordered, vec![3, 1, 2]);
    }

    #[test]
    fn update_dedups_ids() {
        let param = UpdateHomepageParam::from_dto(UpdateHomepageDto {
            hero_title: " Sale ".to_string(),
            hero_subtitle: None,
            hero_image_url: None,
            featured_product_ids: vec![4, 2, 4, 1],
            featured_category_ids: vec![],
        });

        assert_eq!(param.hero_title, "Sale");
        assert_eq!(param.featured_product_ids, vec![4, 2, 1]);
    }
}
