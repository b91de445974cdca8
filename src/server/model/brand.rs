use chrono::{DateTime, Utc};

use crate::model::brand::{BrandDto, CreateBrandDto, UpdateBrandDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Brand {
    pub fn from_entity(entity: entity::brand::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            logo_url: entity.logo_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> BrandDto {
        BrandDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            logo_url: self.logo_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBrandParam {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl CreateBrandParam {
    pub fn from_dto(dto: CreateBrandDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            slug: dto.slug,
            description: dto.description,
            logo_url: dto.logo_url,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBrandParam {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
}

impl UpdateBrandParam {
    pub fn from_dto(dto: UpdateBrandDto) -> Self {
        Self {
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto.description,
            logo_url: dto.logo_url,
        }
    }
}
