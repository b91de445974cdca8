use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::string_enum;

string_enum! {
    pub enum AdPosition {
        HomeBanner => "home_banner",
        Sidebar => "sidebar",
        Popup => "popup",
        Footer => "footer",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdvertisementDto {
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

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAdvertisementDto {
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: AdPosition,
    #[serde(default)]
    pub sort_order: i32,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAdvertisementDto {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub position: Option<AdPosition>,
    pub sort_order: Option<i32>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdClickDto {
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdQuery {
    pub position: Option<AdPosition>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminAdQuery {
    pub position: Option<AdPosition>,
    pub active: Option<bool>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn default_true() -> bool {
    true
}
