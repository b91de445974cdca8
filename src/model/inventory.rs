use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::string_enum;

string_enum! {
    /// Kind of stock movement. `Sale` and `Return` are written by the order flow.
    pub enum MovementKind {
        Import => "import",
        Export => "export",
        Adjustment => "adjustment",
        Sale => "sale",
        Return => "return",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InventoryMovementDto {
    pub id: i32,
    pub product_id: i32,
    pub kind: MovementKind,
    pub quantity: i32,
    pub stock_before: i32,
    pub stock_after: i32,
    pub reference: Option<String>,
    pub note: Option<String>,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMovementDto {
    pub product_id: i32,
    /// One of `import`, `export`, `adjustment`
    pub kind: MovementKind,
    pub quantity: i32,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovementQuery {
    pub product_id: Option<i32>,
    pub kind: Option<MovementKind>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LowStockQuery {
    /// Defaults to the configured low-stock threshold
    pub threshold: Option<i32>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
