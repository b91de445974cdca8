use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    /// Order count keyed by status
    pub orders_by_status: BTreeMap<String, u64>,
    /// Sum of delivered order totals
    pub revenue: i64,
    /// Sum of paid order totals
    pub paid_revenue: i64,
    pub active_products: u64,
    pub low_stock_products: u64,
    pub customers: u64,
    /// Outstanding balance across non-cancelled debts
    pub outstanding_debt: i64,
}
