use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::{
    order::{OrderStatus, PaymentStatus},
    string_enum,
};

string_enum! {
    pub enum InvoiceStatus {
        Draft => "draft",
        Issued => "issued",
        Paid => "paid",
        Cancelled => "cancelled",
    }
}

/// Order summary listed on an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceOrderDto {
    pub id: i32,
    pub code: String,
    pub total: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceDto {
    pub id: i32,
    pub number: String,
    pub user_id: i32,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    /// Issued and past its due date
    pub overdue: bool,
    pub orders: Vec<InvoiceOrderDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInvoiceDto {
    pub order_ids: Vec<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateInvoiceStatusDto {
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceQuery {
    pub status: Option<InvoiceStatus>,
    pub user_id: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
