//! Inventory movement model and the stock arithmetic for manual movements.

use chrono::{DateTime, Utc};

use crate::model::inventory::{CreateMovementDto, InventoryMovementDto, MovementKind, MovementQuery};
use crate::server::{error::AppError, util::parse::parse_enum};

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryMovement {
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

impl InventoryMovement {
    pub fn from_entity(entity: entity::inventory_movement::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            product_id: entity.product_id,
            kind: parse_enum(&entity.kind)?,
            quantity: entity.quantity,
            stock_before: entity.stock_before,
            stock_after: entity.stock_after,
            reference: entity.reference,
            note: entity.note,
            user_id: entity.user_id,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> InventoryMovementDto {
        InventoryMovementDto {
            id: self.id,
            product_id: self.product_id,
            kind: self.kind,
            quantity: self.quantity,
            stock_before: self.stock_before,
            stock_after: self.stock_after,
            reference: self.reference,
            note: self.note,
            user_id: self.user_id,
            created_at: self.created_at,
        }
    }
}

/// Row to insert alongside a stock change.
#[derive(Debug, Clone)]
pub struct RecordMovementParam {
    pub product_id: i32,
    pub kind: MovementKind,
    pub quantity: i32,
    pub stock_before: i32,
    pub stock_after: i32,
    pub reference: Option<String>,
    pub note: Option<String>,
    pub user_id: Option<i32>,
}

/// Manual movement requested by an admin.
#[derive(Debug, Clone)]
pub struct CreateMovementParam {
    pub product_id: i32,
    pub kind: MovementKind,
    pub quantity: i32,
    pub note: Option<String>,
    pub user_id: i32,
}

impl CreateMovementParam {
    pub fn from_dto(user_id: i32, dto: CreateMovementDto) -> Self {
        Self {
            product_id: dto.product_id,
            kind: dto.kind,
            quantity: dto.quantity,
            note: dto.note,
            user_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    pub product_id: Option<i32>,
    pub kind: Option<MovementKind>,
}

impl MovementFilter {
    pub fn from_query(query: &MovementQuery) -> Self {
        Self {
            product_id: query.product_id,
            kind: query.kind,
        }
    }
}

/// Stock after applying a manual movement to `stock`.
///
/// `import` adds and `export` removes a positive quantity; `adjustment` sets the stock
/// to a non-negative quantity. `sale` and `return` are reserved for the order flow.
pub fn apply_manual_movement(kind: MovementKind, quantity: i32, stock: i32) -> Result<i32, String> {
    match kind {
        MovementKind::Import => {
            if quantity <= 0 {
                return Err("Import quantity must be greater than 0".to_string());
            }
            stock
                .checked_add(quantity)
                .ok_or_else(|| "Stock overflow".to_string())
        }
        MovementKind::Export => {
            if quantity <= 0 {
                return Err("Export quantity must be greater than 0".to_string());
            }
            if quantity > stock {
                return Err(format!(
                    "Insufficient stock: {} available, {} requested",
                    stock, quantity
                ));
            }
            Ok(stock - quantity)
        }
        MovementKind::Adjustment => {
            if quantity < 0 {
                return Err("Adjusted stock cannot be negative".to_string());
            }
            Ok(quantity)
        }
        MovementKind::Sale | MovementKind::Return => Err(format!(
            "Movement kind '{}' is recorded by orders only",
            kind
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn import_adds() {
        assert_eq!(apply_manual_movement(MovementKind::Import, 5, 3), Ok(8));
    }

    #[test]
    fn export_cannot_go_negative() {
        assert_eq!(apply_manual_movement(MovementKind::Export, 3, 3), Ok(0));
        assert!(apply_manual_movement(MovementKind::Export, 4, 3).is_err());
    }

    #[test]
    fn adjustment_sets_absolute_value() {
        assert_eq!(apply_manual_movement(MovementKind::Adjustment, 0, 42), Ok(0));
        assert!(apply_manual_movement(MovementKind::Adjustment, -1, 42).is_err());
    }

    #[test]
    fn rejects_non_positive_quantities() {
        assert!(apply_manual_movement(MovementKind::Import, 0, 3).is_err());
        assert!(apply_manual_movement(MovementKind::Export, -2, 3).is_err());
    }

    #[test]
    fn rejects_order_kinds() {
        assert!(apply_manual_movement(MovementKind::Sale, 1, 3).is_err());
        assert!(apply_manual_movement(MovementKind::Return, 1, 3).is_err());
    }
}
