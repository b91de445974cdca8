use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::string_enum;

string_enum! {
    pub enum DebtStatus {
        Unpaid => "unpaid",
        Partial => "partial",
        Paid => "paid",
        Overdue => "overdue",
        Cancelled => "cancelled",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DebtItemDto {
    pub id: i32,
    pub order_id: i32,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DebtPaymentDto {
    pub id: i32,
    pub amount: i64,
    pub method: String,
    pub note: Option<String>,
    pub recorded_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DebtDto {
    pub id: i32,
    pub user_id: i32,
    pub total_amount: i64,
    pub paid_amount: i64,
    pub outstanding: i64,
    pub status: DebtStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub items: Vec<DebtItemDto>,
    pub payments: Vec<DebtPaymentDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDebtItemDto {
    pub order_id: i32,
    /// Defaults to the order total
    pub amount: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDebtDto {
    pub user_id: i32,
    pub items: Vec<CreateDebtItemDto>,
    pub due_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordPaymentDto {
    pub amount: i64,
    pub method: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DebtSummaryDto {
    pub total_amount: i64,
    pub paid_amount: i64,
    pub outstanding: i64,
    pub open_count: u64,
    pub overdue_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DebtQuery {
    pub status: Option<DebtStatus>,
    pub user_id: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DebtSummaryQuery {
    pub user_id: Option<i32>,
}
