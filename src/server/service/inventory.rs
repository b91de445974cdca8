//! Manual stock movements and stock reports.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    cache::ResponseCache,
    data::{inventory::InventoryRepository, product::ProductRepository},
    error::AppError,
    model::{
        inventory::{
            apply_manual_movement, CreateMovementParam, InventoryMovement, MovementFilter,
            RecordMovementParam,
        },
        pagination::{PageRequest, Paginated},
        product::Product,
    },
};

pub struct InventoryService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a ResponseCache,
}

impl<'a> InventoryService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a ResponseCache) -> Self {
        Self { db, cache }
    }

    /// Applies an import, export or adjustment and records it, in one transaction.
    ///
    /// # Returns
    /// - `Ok(InventoryMovement)` - The recorded movement with stock before and after
    /// - `Err(AppError::BadRequest)` - Kind not allowed, bad quantity or insufficient stock
    /// - `Err(AppError::NotFound)` - Unknown product
    pub async fn create_movement(
        &self,
        param: CreateMovementParam,
    ) -> Result<InventoryMovement, AppError> {
        let txn = self.db.begin().await?;

        let product_repo = ProductRepository::new(&txn);
        let product = product_repo
            .find_by_id(param.product_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product"))?;

        let stock_after = apply_manual_movement(param.kind, param.quantity, product.stock)
            .map_err(AppError::BadRequest)?;

        product_repo.set_stock(product.id, stock_after).await?;
        let movement = InventoryRepository::new(&txn)
            .record(RecordMovementParam {
                product_id: product.id,
                kind: param.kind,
                quantity: param.quantity,
                stock_before: product.stock,
                stock_after,
                reference: None,
                note: param.note,
                user_id: Some(param.user_id),
            })
            .await?;

        txn.commit().await?;
        self.cache.invalidate_product(product.id).await;

        tracing::info!(
            product_id = product.id,
            kind = %param.kind,
            stock_before = product.stock,
            stock_after,
            "Recorded inventory movement"
        );

        Ok(movement)
    }

    pub async fn list(
        &self,
        filter: MovementFilter,
        page: PageRequest,
    ) -> Result<Paginated<InventoryMovement>, AppError> {
        InventoryRepository::new(self.db).list(filter, page).await
    }

    /// Active products at or below `threshold`, lowest stock first.
    pub async fn low_stock(
        &self,
        threshold: i32,
        page: PageRequest,
    ) -> Result<Paginated<Product>, AppError> {
        if threshold < 0 {
            return Err(AppError::BadRequest(
                "Threshold cannot be negative".to_string(),
            ));
        }

        ProductRepository::new(self.db)
            .low_stock(threshold, page)
            .await
    }
}
