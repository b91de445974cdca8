use chrono::{DateTime, Utc};

use crate::model::category::{CategoryDto, CategoryQuery, CreateCategoryDto, UpdateCategoryDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn from_entity(entity: entity::category::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            parent_id: entity.parent_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> CategoryDto {
        CategoryDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            parent_id: self.parent_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCategoryParam {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}

impl CreateCategoryParam {
    pub fn from_dto(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            slug: dto.slug,
            description: dto.description,
            parent_id: dto.parent_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryParam {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}

impl UpdateCategoryParam {
    pub fn from_dto(dto: UpdateCategoryDto) -> Self {
        Self {
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto.description,
            parent_id: dto.parent_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub parent_id: Option<i32>,
    pub search: Option<String>,
}

impl CategoryFilter {
    pub fn from_query(query: &CategoryQuery) -> Self {
        Self {
            parent_id: query.parent_id,
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}
