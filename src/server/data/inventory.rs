//! Inventory movement repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        inventory::{InventoryMovement, MovementFilter, RecordMovementParam},
        pagination::{PageRequest, Paginated},
    },
};

pub struct InventoryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InventoryRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends a movement row. The caller updates the product stock in the same
    /// transaction.
    pub async fn record(&self, param: RecordMovementParam) -> Result<InventoryMovement, AppError> {
        let entity = entity::inventory_movement::ActiveModel {
            product_id: ActiveValue::Set(param.product_id),
            kind: ActiveValue::Set(param.kind.to_string()),
            quantity: ActiveValue::Set(param.quantity),
            stock_before: ActiveValue::Set(param.stock_before),
            stock_after: ActiveValue::Set(param.stock_after),
            reference: ActiveValue::Set(param.reference),
            note: ActiveValue::Set(param.note),
            user_id: ActiveValue::Set(param.user_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        InventoryMovement::from_entity(entity)
    }

    /// Lists movements newest first.
    pub async fn list(
        &self,
        filter: MovementFilter,
        page: PageRequest,
    ) -> Result<Paginated<InventoryMovement>, AppError> {
        let mut query = entity::prelude::InventoryMovement::find();
        if let Some(product_id) = filter.product_id {
            query = query.filter(entity::inventory_movement::Column::ProductId.eq(product_id));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(entity::inventory_movement::Column::Kind.eq(kind.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::inventory_movement::Column::CreatedAt)
            .order_by_desc(entity::inventory_movement::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let movements = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(InventoryMovement::from_entity)
            .collect::<Result<_, _>>()?;

        Ok(Paginated::new(movements, page, total))
    }
}
