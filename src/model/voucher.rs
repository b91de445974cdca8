use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::string_enum;

string_enum! {
    pub enum DiscountType {
        Percent => "percent",
        Fixed => "fixed",
    }
}

string_enum! {
    /// Lifecycle state derived from the voucher's flags, window and usage.
    pub enum VoucherStatus {
        Disabled => "disabled",
        Upcoming => "upcoming",
        Expired => "expired",
        Exhausted => "exhausted",
        Active => "active",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoucherDto {
    pub id: i32,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub max_discount: Option<i64>,
    pub min_order_value: i64,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub per_user_limit: i32,
    pub active: bool,
    pub status: VoucherStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoucherUsageDto {
    pub id: i32,
    pub user_id: i32,
    pub order_id: i32,
    pub discount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoucherDetailDto {
    pub voucher: VoucherDto,
    pub usage_count: u64,
    pub usages: Vec<VoucherUsageDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateVoucherDto {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub max_discount: Option<i64>,
    #[serde(default)]
    pub min_order_value: i64,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub usage_limit: Option<i32>,
    #[serde(default = "default_per_user_limit")]
    pub per_user_limit: i32,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateVoucherDto {
    /// Rejected once the voucher has been used
    pub code: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<i64>,
    pub max_discount: Option<i64>,
    /// Removes the discount cap when true
    #[serde(default)]
    pub clear_max_discount: bool,
    pub min_order_value: Option<i64>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    /// Removes the total usage limit when true
    #[serde(default)]
    pub clear_usage_limit: bool,
    pub per_user_limit: Option<i32>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateVoucherDto {
    pub code: String,
    pub subtotal: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoucherValidationDto {
    pub code: String,
    pub discount: i64,
    pub final_amount: i64,
    pub status: VoucherStatus,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VoucherQuery {
    pub status: Option<VoucherStatus>,
    /// Matches the code
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

fn default_per_user_limit() -> i32 {
    1
}

fn default_true() -> bool {
    true
}
