//! Customer debt ledger.
//!
//! A debt groups unpaid orders of one customer. Payments accumulate against it and its
//! status is re-derived after each one; once fully paid, the linked orders are paid.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{debt::DebtStatus, notification::NotificationKind, order::PaymentStatus},
    server::{
        data::{
            debt::{DebtRepository, NewDebt},
            order::OrderRepository,
            user::UserRepository,
        },
        error::AppError,
        model::{
            debt::{derive_status, CreateDebtParam, Debt, DebtFilter, DebtSummary, RecordPaymentParam},
            pagination::{PageRequest, Paginated},
        },
        service::notification::notify,
    },
};

pub struct DebtService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DebtService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a debt over unpaid orders of `param.user_id`.
    ///
    /// # Returns
    /// - `Ok(Debt)` - The new debt, `unpaid` or `overdue` if already past due
    /// - `Err(AppError::NotFound)` - Unknown user
    /// - `Err(AppError::BadRequest)` - No items, duplicate or foreign orders, orders that
    ///   are cancelled, returned or paid, or an amount outside `1..=order.total`
    /// - `Err(AppError::Conflict)` - An order is already in an open debt
    pub async fn create(&self, param: CreateDebtParam) -> Result<Debt, AppError> {
        if param.items.is_empty() {
            return Err(AppError::BadRequest(
                "A debt needs at least one order".to_string(),
            ));
        }

        let order_ids: Vec<i32> = param.items.iter().map(|i| i.order_id).collect();
        let distinct: HashSet<i32> = order_ids.iter().copied().collect();
        if distinct.len() != order_ids.len() {
            return Err(AppError::BadRequest(
                "Order ids must be distinct".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        if UserRepository::new(&txn)
            .find_by_id(param.user_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("User"));
        }

        let orders = OrderRepository::new(&txn).find_by_ids(&order_ids).await?;

        let mut items = Vec::with_capacity(param.items.len());
        for item in &param.items {
            let order = orders
                .iter()
                .find(|o| o.id == item.order_id && o.user_id == param.user_id)
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Order {} does not belong to user {}",
                        item.order_id, param.user_id
                    ))
                })?;

            if order.status.releases_stock() {
                return Err(AppError::BadRequest(format!(
                    "Order {} is {}",
                    order.code, order.status
                )));
            }
            if order.payment_status != PaymentStatus::Unpaid {
                return Err(AppError::BadRequest(format!(
                    "Order {} is already paid",
                    order.code
                )));
            }

            let amount = item.amount.unwrap_or(order.total);
            if amount < 1 || amount > order.total {
                return Err(AppError::BadRequest(format!(
                    "Amount for order {} must be between 1 and {}",
                    order.code, order.total
                )));
            }

            items.push((order.id, amount));
        }

        let repo = DebtRepository::new(&txn);
        let taken = repo.orders_in_open_debts(&order_ids).await?;
        if !taken.is_empty() {
            return Err(AppError::Conflict(format!(
                "Orders already in an open debt: {:?}",
                taken
            )));
        }

        let total: i64 = items.iter().map(|(_, amount)| amount).sum();
        let debt = repo
            .create(NewDebt {
                user_id: param.user_id,
                status: derive_status(total, 0, param.due_date, Utc::now()),
                due_date: param.due_date,
                note: param.note,
                items,
            })
            .await?;

        notify(
            &txn,
            debt.user_id,
            NotificationKind::Debt,
            "New debt recorded",
            format!("A debt of {} has been recorded on your account.", debt.total_amount),
            Some(format!("/debts/{}", debt.id)),
        )
        .await?;

        txn.commit().await?;

        tracing::info!(
            debt_id = debt.id,
            user_id = debt.user_id,
            total = debt.total_amount,
            "Created debt"
        );

        Ok(debt)
    }

    /// Records a payment and re-derives the status.
    ///
    /// # Returns
    /// - `Ok(Debt)` - The debt with the new payment
    /// - `Err(AppError::NotFound)` - Unknown debt
    /// - `Err(AppError::BadRequest)` - Debt closed, empty method, or amount not in
    ///   `1..=outstanding`
    pub async fn record_payment(
        &self,
        id: i32,
        param: RecordPaymentParam,
    ) -> Result<Debt, AppError> {
        if param.method.is_empty() {
            return Err(AppError::BadRequest(
                "Payment method is required".to_string(),
            ));
        }

        let txn = self.db.begin().await?;
        let repo = DebtRepository::new(&txn);

        let debt = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Debt"))?;
        if !debt.status.is_open() {
            return Err(AppError::BadRequest(format!(
                "Cannot record a payment on a {} debt",
                debt.status
            )));
        }

        let outstanding = debt.outstanding();
        if param.amount <= 0 || param.amount > outstanding {
            return Err(AppError::BadRequest(format!(
                "Payment must be between 1 and {}",
                outstanding
            )));
        }

        let amount = param.amount;
        repo.add_payment(id, param).await?;

        let paid_amount = debt.paid_amount + amount;
        let status = derive_status(debt.total_amount, paid_amount, debt.due_date, Utc::now());
        repo.set_paid(id, paid_amount, status).await?;

        if status == DebtStatus::Paid {
            let order_ids: Vec<i32> = debt.items.iter().map(|i| i.order_id).collect();
            OrderRepository::new(&txn).mark_paid(&order_ids).await?;

            notify(
                &txn,
                debt.user_id,
                NotificationKind::Debt,
                "Debt settled",
                format!("Your debt of {} has been paid in full.", debt.total_amount),
                Some(format!("/debts/{}", debt.id)),
            )
            .await?;
        }

        let updated = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Debt"))?;

        txn.commit().await?;

        tracing::info!(debt_id = id, amount, status = %status, "Recorded debt payment");

        Ok(updated)
    }

    /// Cancels a debt that has no payments.
    pub async fn cancel(&self, id: i32) -> Result<Debt, AppError> {
        let repo = DebtRepository::new(self.db);

        let debt = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Debt"))?;
        if debt.status == DebtStatus::Cancelled {
            return Err(AppError::BadRequest("Debt is already cancelled".to_string()));
        }
        if repo.payment_count(id).await? > 0 {
            return Err(AppError::BadRequest(
                "Debt has payments and cannot be cancelled".to_string(),
            ));
        }

        let debt = repo
            .set_status(id, DebtStatus::Cancelled)
            .await?
            .ok_or_else(|| AppError::not_found("Debt"))?;

        tracing::info!(debt_id = id, "Cancelled debt");

        Ok(debt)
    }

    pub async fn list(
        &self,
        filter: DebtFilter,
        page: PageRequest,
    ) -> Result<Paginated<Debt>, AppError> {
        DebtRepository::new(self.db).list(filter, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Debt, AppError> {
        DebtRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Debt"))
    }

    /// Aggregates non-cancelled debts, optionally of one user.
    pub async fn summary(&self, user_id: Option<i32>) -> Result<DebtSummary, AppError> {
        let rows = DebtRepository::new(self.db).summary_rows(user_id).await?;

        Ok(DebtSummary::from_rows(rows))
    }

    /// Flags open debts past their due date. Run by the scheduler.
    pub async fn mark_overdue(&self) -> Result<u64, AppError> {
        DebtRepository::new(self.db).mark_overdue(Utc::now()).await
    }
}
