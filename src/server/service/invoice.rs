//! Invoices grouping one customer's orders.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{invoice::InvoiceStatus, notification::NotificationKind},
    server::{
        data::{
            invoice::{InvoiceRepository, NewInvoice},
            order::OrderRepository,
        },
        error::AppError,
        model::{
            invoice::{CreateInvoiceParam, Invoice, InvoiceFilter},
            pagination::{PageRequest, Paginated},
        },
        service::notification::notify,
        util::code::{invoice_number, invoice_prefix},
    },
};

pub struct InvoiceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InvoiceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft invoice over orders of a single customer.
    ///
    /// The number continues the current month's sequence.
    ///
    /// # Returns
    /// - `Ok(Invoice)` - The draft with order summaries
    /// - `Err(AppError::BadRequest)` - Empty or duplicate ids, unknown orders, orders of
    ///   several users, or cancelled/returned orders
    /// - `Err(AppError::Conflict)` - An order is already on an open invoice
    pub async fn create(&self, param: CreateInvoiceParam) -> Result<Invoice, AppError> {
        if param.order_ids.is_empty() {
            return Err(AppError::BadRequest(
                "An invoice needs at least one order".to_string(),
            ));
        }
        let distinct: HashSet<i32> = param.order_ids.iter().copied().collect();
        if distinct.len() != param.order_ids.len() {
            return Err(AppError::BadRequest(
                "Order ids must be distinct".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let orders = OrderRepository::new(&txn)
            .find_by_ids(&param.order_ids)
            .await?;
        if orders.len() != param.order_ids.len() {
            return Err(AppError::BadRequest(
                "One or more orders do not exist".to_string(),
            ));
        }

        let user_id = orders[0].user_id;
        if orders.iter().any(|o| o.user_id != user_id) {
            return Err(AppError::BadRequest(
                "All orders must belong to the same customer".to_string(),
            ));
        }
        if let Some(order) = orders.iter().find(|o| o.status.releases_stock()) {
            return Err(AppError::BadRequest(format!(
                "Order {} is {} and cannot be invoiced",
                order.code, order.status
            )));
        }

        let repo = InvoiceRepository::new(&txn);
        let taken = repo.orders_on_open_invoices(&param.order_ids).await?;
        if !taken.is_empty() {
            return Err(AppError::Conflict(format!(
                "Orders already invoiced: {:?}",
                taken
            )));
        }

        let now = Utc::now();
        let prefix = invoice_prefix(now);
        let sequence = match repo.latest_number(&prefix).await? {
            Some(latest) => next_sequence(&prefix, &latest)?,
            None => 1,
        };

        let invoice = repo
            .create(NewInvoice {
                number: invoice_number(&prefix, sequence),
                user_id,
                amount: orders.iter().map(|o| o.total).sum(),
                due_date: param.due_date,
                note: param.note,
                order_ids: param.order_ids,
            })
            .await?;

        txn.commit().await?;

        tracing::info!(
            invoice_id = invoice.id,
            number = %invoice.number,
            user_id,
            amount = invoice.amount,
            "Created invoice"
        );

        Ok(invoice)
    }

    /// Moves an invoice through its status machine. Paying it pays every linked order.
    ///
    /// # Returns
    /// - `Ok(Invoice)` - The updated invoice
    /// - `Err(AppError::NotFound)` - Unknown invoice
    /// - `Err(AppError::BadRequest)` - Transition not allowed
    pub async fn update_status(&self, id: i32, status: InvoiceStatus) -> Result<Invoice, AppError> {
        let txn = self.db.begin().await?;
        let repo = InvoiceRepository::new(&txn);

        let invoice = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))?;
        if !invoice.status.can_transition_to(status) {
            return Err(AppError::BadRequest(format!(
                "Cannot change invoice status from {} to {}",
                invoice.status, status
            )));
        }

        let updated = repo
            .set_status(id, status, Utc::now())
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))?;

        if status == InvoiceStatus::Paid {
            let order_ids: Vec<i32> = updated.orders.iter().map(|o| o.id).collect();
            OrderRepository::new(&txn).mark_paid(&order_ids).await?;
        }

        if matches!(status, InvoiceStatus::Issued | InvoiceStatus::Paid) {
            notify(
                &txn,
                updated.user_id,
                NotificationKind::Invoice,
                format!("Invoice {} {}", updated.number, status),
                format!(
                    "Invoice {} for {} is now {}.",
                    updated.number, updated.amount, status
                ),
                Some(format!("/invoices/{}", updated.id)),
            )
            .await?;
        }

        txn.commit().await?;

        tracing::info!(
            invoice_id = id,
            from = %invoice.status,
            to = %status,
            "Invoice status changed"
        );

        Ok(updated)
    }

    pub async fn list(
        &self,
        filter: InvoiceFilter,
        page: PageRequest,
    ) -> Result<Paginated<Invoice>, AppError> {
        InvoiceRepository::new(self.db).list(filter, page).await
    }

    pub async fn get(&self, id: i32) -> Result<Invoice, AppError> {
        InvoiceRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))
    }

    /// A customer's own invoice; drafts and other users' invoices are a 404.
    pub async fn get_for_user(&self, user_id: i32, id: i32) -> Result<Invoice, AppError> {
        let invoice = self.get(id).await?;
        if invoice.user_id != user_id || invoice.status == InvoiceStatus::Draft {
            return Err(AppError::not_found("Invoice"));
        }
        Ok(invoice)
    }

    /// Issued invoices whose due date has passed.
    pub async fn count_overdue(&self) -> Result<u64, AppError> {
        InvoiceRepository::new(self.db)
            .count_overdue(Utc::now())
            .await
    }
}

/// Sequence following `latest` within `prefix`.
fn next_sequence(prefix: &str, latest: &str) -> Result<u64, AppError> {
    latest
        .strip_prefix(prefix)
        .and_then(|n| n.parse::<u64>().ok())
        .map(|n| n + 1)
        .ok_or_else(|| AppError::InternalError(format!("Malformed invoice number '{}'", latest)))
}

#[cfg(test)]
mod tests {
    use super::next_sequence;

    #[test]
    fn continues_monthly_sequence() {
        assert_eq!(next_sequence("INV-202603-", "INV-202603-0007").unwrap(), 8);
        assert_eq!(next_sequence("INV-202603-", "INV-202603-9999").unwrap(), 10000);
    }

    #[test]
    fn rejects_malformed_number() {
        assert!(next_sequence("INV-202603-", "INV-202602-0001").is_err());
        assert!(next_sequence("INV-202603-", "INV-202603-abcd").is_err());
    }
}
