use chrono::{DateTime, Utc};

use crate::model::notification::{CreateNotificationDto, NotificationDto, NotificationKind};
use crate::server::{error::AppError, util::parse::parse_enum};

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub user_id: i32,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: parse_enum(&entity.kind)?,
            title: entity.title,
            message: entity.message,
            link: entity.link,
            read: entity.read,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            link: self.link,
            read: self.read,
            created_at: self.created_at,
        }
    }
}

/// Content of a notification, independent of its recipient.
#[derive(Debug, Clone)]
pub struct NotificationContent {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SendNotificationParam {
    /// `None` broadcasts to every active user.
    pub user_id: Option<i32>,
    pub content: NotificationContent,
}

impl SendNotificationParam {
    pub fn from_dto(dto: CreateNotificationDto) -> Self {
        Self {
            user_id: dto.user_id,
            content: NotificationContent {
                kind: dto.kind,
                title: dto.title.trim().to_string(),
                message: dto.message,
                link: dto.link,
            },
        }
    }
}
