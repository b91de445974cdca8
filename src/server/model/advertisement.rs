use chrono::{DateTime, Utc};

use crate::model::advertisement::{
    AdPosition, AdminAdQuery, AdvertisementDto, CreateAdvertisementDto, UpdateAdvertisementDto,
};
use crate::server::{error::AppError, util::parse::parse_enum};

#[derive(Debug, Clone, PartialEq)]
pub struct Advertisement {
    pub id: i32,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: AdPosition,
    pub sort_order: i32,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub clicks: i64,
    pub impressions: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Advertisement {
    pub fn from_entity(entity: entity::advertisement::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            title: entity.title,
            image_url: entity.image_url,
            link_url: entity.link_url,
            position: parse_enum(&entity.position)?,
            sort_order: entity.sort_order,
            start_at: entity.start_at,
            end_at: entity.end_at,
            active: entity.active,
            clicks: entity.clicks,
            impressions: entity.impressions,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Active and inside its optional schedule window.
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        self.active
            && self.start_at.is_none_or(|start| start <= now)
            && self.end_at.is_none_or(|end| end >= now)
    }

    pub fn into_dto(self) -> AdvertisementDto {
        AdvertisementDto {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            link_url: self.link_url,
            position: self.position,
            sort_order: self.sort_order,
            start_at: self.start_at,
            end_at: self.end_at,
            active: self.active,
            clicks: self.clicks,
            impressions: self.impressions,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdvertisementFields {
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: AdPosition,
    pub sort_order: i32,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl AdvertisementFields {
    pub fn from_dto(dto: CreateAdvertisementDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            image_url: dto.image_url,
            link_url: dto.link_url,
            position: dto.position,
            sort_order: dto.sort_order,
            start_at: dto.start_at,
            end_at: dto.end_at,
            active: dto.active,
        }
    }

    pub fn merged(ad: &Advertisement, dto: UpdateAdvertisementDto) -> Self {
        Self {
            title: dto
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| ad.title.clone()),
            image_url: dto.image_url.unwrap_or_else(|| ad.image_url.clone()),
            link_url: dto.link_url.or_else(|| ad.link_url.clone()),
            position: dto.position.unwrap_or(ad.position),
            sort_order: dto.sort_order.unwrap_or(ad.sort_order),
            start_at: dto.start_at.or(ad.start_at),
            end_at: dto.end_at.or(ad.end_at),
            active: dto.active.unwrap_or(ad.active),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Title must not be empty".to_string());
        }
        if let (Some(start), Some(end)) = (self.start_at, self.end_at) {
            if end <= start {
                return Err("end_at must be after start_at".to_string());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdFilter {
    pub position: Option<AdPosition>,
    pub active: Option<bool>,
}

impl AdFilter {
    pub fn from_query(query: &AdminAdQuery) -> Self {
        Self {
            position: query.position,
            active: query.active,
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::Duration;

    use super::*;

    fn ad(
        active: bool,
        start_at: Option<DateTime<Utc>>,
        end_at: Option<DateTime<Utc>>,
    ) -> Advertisement {
        let now = Utc::now();
        Advertisement {
            id: 1,
            title: "Summer".to_string(),
            image_url: "https://cdn.example.com/summer.png".to_string(),
            link_url: None,
            position: AdPosition::HomeBanner,
            sort_order: 0,
            start_at,
            end_at,
            active,
            clicks: 0,
            impressions: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn running_without_window() {
        assert!(ad(true, None, None).is_running(Utc::now()));
        assert!(!ad(false, None, None).is_running(Utc::now()));
    }

    #[test]
    fn respects_window() {
        let now = Utc::now();
        let hour = Duration::hours(1);

        assert!(ad(true, Some(now - hour), Some(now + hour)).is_running(now));
        assert!(!ad(true, Some(now + hour), None).is_running(now));
        assert!(!ad(true, None, Some(now - hour)).is_running(now));
        assert!(ad(true, Some(now), Some(now)).is_running(now));
    }

    #[test]
    fn rejects_inverted_window() {
        let now = Utc::now();
        let fields = AdvertisementFields::from_dto(CreateAdvertisementDto {
            title: "Popup".to_string(),
            image_url: "https://cdn.example.com/p.png".to_string(),
            link_url: None,
            position: AdPosition::Popup,
            sort_order: 0,
            start_at: Some(now),
            end_at: Some(now - Duration::minutes(5)),
            active: true,
        });

        assert!(fields.validate().is_err());
    }
}
