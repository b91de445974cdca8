//! Advertisement placements and their counters.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::advertisement::{AdPosition, UpdateAdvertisementDto},
    server::{
        cache::ResponseCache,
        data::advertisement::AdvertisementRepository,
        error::AppError,
        model::{
            advertisement::{AdFilter, Advertisement, AdvertisementFields},
            pagination::{PageRequest, Paginated},
        },
    },
};

pub struct AdvertisementService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> AdvertisementService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    /// Running ads, optionally at one position. Each returned ad counts an impression.
    pub async fn running(&self, position: Option<AdPosition>) -> Result<Vec<Advertisement>, AppError> {
        let repo = AdvertisementRepository::new(self.db);

        let ads = repo.running(position, Utc::now()).await?;
        let ids: Vec<i32> = ads.iter().map(|ad| ad.id).collect();
        repo.record_impressions(&ids).await?;

        Ok(ads)
    }

    /// Counts a click on a running ad and returns where it leads.
    ///
    /// # Returns
    /// - `Ok(Option<String>)` - The ad's link, if it has one
    /// - `Err(AppError::NotFound)` - Unknown ad, or one that is not running
    pub async fn click(&self, id: i32) -> Result<Option<String>, AppError> {
        let repo = AdvertisementRepository::new(self.db);

        let ad = repo
            .find_by_id(id)
            .await?
            .filter(|ad| ad.is_running(Utc::now()))
            .ok_or_else(|| AppError::not_found("Advertisement"))?;

        repo.record_click(id).await?;

        Ok(ad.link_url)
    }

    pub async fn list(
        &self,
        filter: AdFilter,
        page: PageRequest,
    ) -> Result<Paginated<Advertisement>, AppError> {
        AdvertisementRepository::new(self.db).list(filter, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Advertisement, AppError> {
        AdvertisementRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Advertisement"))
    }

    pub async fn create(&self, fields: AdvertisementFields) -> Result<Advertisement, AppError> {
        fields.validate().map_err(AppError::BadRequest)?;

        let ad = AdvertisementRepository::new(self.db).create(fields).await?;
        self.cache.invalidate_homepage().await;

        tracing::info!(ad_id = ad.id, position = %ad.position, "Created advertisement");

        Ok(ad)
    }

    pub async fn update(
        &self,
        id: i32,
        dto: UpdateAdvertisementDto,
    ) -> Result<Advertisement, AppError> {
        let current = self.get(id).await?;

        let fields = AdvertisementFields::merged(&current, dto);
        fields.validate().map_err(AppError::BadRequest)?;

        let ad = AdvertisementRepository::new(self.db)
            .update(id, fields)
            .await?
            .ok_or_else(|| AppError::not_found("Advertisement"))?;
        self.cache.invalidate_homepage().await;

        Ok(ad)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !AdvertisementRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found("Advertisement"));
        }
        self.cache.invalidate_homepage().await;

        Ok(())
    }
}
