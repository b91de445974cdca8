//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::user::{RegisterDto, UpdateProfileDto, UserDto, UserQuery};

/// Registered account, customer or admin.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Stored lowercased.
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub admin: bool,
    /// Disabled accounts cannot log in or pass the auth guard.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    ///
    /// The password hash never leaves the server.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            phone: self.phone,
            admin: self.admin,
            active: self.active,
            created_at: self.created_at,
        }
    }

    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            phone: entity.phone,
            password_hash: entity.password_hash,
            admin: entity.admin,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Parameters for inserting a user whose password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub admin: bool,
}

/// Registration input before validation and hashing.
#[derive(Debug, Clone)]
pub struct RegisterParam {
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone: Option<String>,
}

impl RegisterParam {
    /// Trims the name and normalizes the email to lowercase.
    pub fn from_dto(dto: RegisterDto) -> Self {
        Self {
            email: dto.email.trim().to_lowercase(),
            name: dto.name.trim().to_string(),
            password: dto.password,
            phone: dto.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParam {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl UpdateProfileParam {
    pub fn from_dto(dto: UpdateProfileDto) -> Self {
        Self {
            name: dto.name.map(|n| n.trim().to_string()),
            phone: dto.phone.map(|p| p.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: Option<String>,
}

impl UserFilter {
    pub fn from_query(query: &UserQuery) -> Self {
        Self {
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}
