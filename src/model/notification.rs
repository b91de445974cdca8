use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::string_enum;

string_enum! {
    pub enum NotificationKind {
        Order => "order",
        Promotion => "promotion",
        System => "system",
        Debt => "debt",
        Invoice => "invoice",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationDto {
    pub id: i32,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin-authored notification. Without `user_id` it is sent to every active user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNotificationDto {
    pub user_id: Option<i32>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
