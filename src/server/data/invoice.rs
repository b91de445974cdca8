//! Invoice repository.
//!
//! An invoice links to its orders through `invoice_order`. Reads resolve those links
//! into order summaries so the domain `Invoice` is complete.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    model::invoice::InvoiceStatus,
    server::{
        error::AppError,
        model::{
            invoice::{Invoice, InvoiceFilter},
            pagination::{PageRequest, Paginated},
        },
    },
};

/// Row values for a new draft invoice.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub number: String,
    pub user_id: i32,
    pub amount: i64,
    pub due_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub order_ids: Vec<i32>,
}

pub struct InvoiceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InvoiceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a `draft` invoice and its order links.
    pub async fn create(&self, param: NewInvoice) -> Result<Invoice, AppError> {
        let now = Utc::now();
        let invoice = entity::invoice::ActiveModel {
            number: ActiveValue::Set(param.number),
            user_id: ActiveValue::Set(param.user_id),
            amount: ActiveValue::Set(param.amount),
            status: ActiveValue::Set(InvoiceStatus::Draft.to_string()),
            due_date: ActiveValue::Set(param.due_date),
            note: ActiveValue::Set(param.note),
            issued_at: ActiveValue::Set(None),
            paid_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        if !param.order_ids.is_empty() {
            let links = param
                .order_ids
                .into_iter()
                .map(|order_id| entity::invoice_order::ActiveModel {
                    invoice_id: ActiveValue::Set(invoice.id),
                    order_id: ActiveValue::Set(order_id),
                });
            entity::prelude::InvoiceOrder::insert_many(links)
                .exec_without_returning(self.db)
                .await?;
        }

        self.with_orders(vec![invoice])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("created invoice vanished".to_string()))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Invoice>, AppError> {
        let Some(entity) = entity::prelude::Invoice::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        self.with_orders(vec![entity]).await.map(|mut i| i.pop())
    }

    /// Number of the most recently created invoice starting with `prefix`, e.g.
    /// `INV-202601-`. Sequences only grow, so that is also the highest one.
    pub async fn latest_number(&self, prefix: &str) -> Result<Option<String>, AppError> {
        let latest = entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::Number.starts_with(prefix))
            .order_by_desc(entity::invoice::Column::Id)
            .one(self.db)
            .await?;

        Ok(latest.map(|invoice| invoice.number))
    }

    /// Writes a new status, stamping `issued_at` or `paid_at` as appropriate.
    pub async fn set_status(
        &self,
        id: i32,
        status: InvoiceStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<Invoice>, AppError> {
        let Some(entity) = entity::prelude::Invoice::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::invoice::ActiveModel = entity.into();
        active.status = ActiveValue::Set(status.to_string());
        match status {
            InvoiceStatus::Issued => active.issued_at = ActiveValue::Set(Some(now)),
            InvoiceStatus::Paid => active.paid_at = ActiveValue::Set(Some(now)),
            InvoiceStatus::Draft | InvoiceStatus::Cancelled => {}
        }
        active.updated_at = ActiveValue::Set(now);
        let entity = active.update(self.db).await?;

        self.with_orders(vec![entity]).await.map(|mut i| i.pop())
    }

    /// Of `order_ids`, those already linked to an invoice that is not cancelled.
    pub async fn orders_on_open_invoices(&self, order_ids: &[i32]) -> Result<Vec<i32>, AppError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let links = entity::prelude::InvoiceOrder::find()
            .filter(entity::invoice_order::Column::OrderId.is_in(order_ids.iter().copied()))
            .all(self.db)
            .await?;
        if links.is_empty() {
            return Ok(Vec::new());
        }

        let invoice_ids: HashSet<i32> = links.iter().map(|l| l.invoice_id).collect();
        let open: HashSet<i32> = entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::Id.is_in(invoice_ids))
            .filter(entity::invoice::Column::Status.ne(InvoiceStatus::Cancelled.as_str()))
            .all(self.db)
            .await?
            .into_iter()
            .map(|invoice| invoice.id)
            .collect();

        let mut taken: Vec<i32> = links
            .into_iter()
            .filter(|l| open.contains(&l.invoice_id))
            .map(|l| l.order_id)
            .collect();
        taken.sort_unstable();
        taken.dedup();

        Ok(taken)
    }

    /// Lists invoices newest first.
    pub async fn list(
        &self,
        filter: InvoiceFilter,
        page: PageRequest,
    ) -> Result<Paginated<Invoice>, AppError> {
        let mut query = entity::prelude::Invoice::find();
        if let Some(status) = filter.status {
            query = query.filter(entity::invoice::Column::Status.eq(status.as_str()));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(entity::invoice::Column::UserId.eq(user_id));
        }
        if filter.exclude_drafts {
            query = query.filter(entity::invoice::Column::Status.ne(InvoiceStatus::Draft.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::invoice::Column::CreatedAt)
            .order_by_desc(entity::invoice::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;
        let invoices = self.with_orders(entities).await?;

        Ok(Paginated::new(invoices, page, total))
    }

    /// Issued invoices whose due date is before `now`.
    pub async fn count_overdue(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let count = entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::Status.eq(InvoiceStatus::Issued.as_str()))
            .filter(entity::invoice::Column::DueDate.lt(now))
            .count(self.db)
            .await?;

        Ok(count)
    }

    async fn with_orders(
        &self,
        entities: Vec<entity::invoice::Model>,
    ) -> Result<Vec<Invoice>, AppError> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let invoice_ids: Vec<i32> = entities.iter().map(|i| i.id).collect();
        let links = entity::prelude::InvoiceOrder::find()
            .filter(entity::invoice_order::Column::InvoiceId.is_in(invoice_ids))
            .all(self.db)
            .await?;

        let order_ids: HashSet<i32> = links.iter().map(|l| l.order_id).collect();
        let orders: HashMap<i32, entity::order::Model> = entity::prelude::Order::find()
            .filter(entity::order::Column::Id.is_in(order_ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|o| (o.id, o))
            .collect();

        let mut by_invoice: HashMap<i32, Vec<entity::order::Model>> = HashMap::new();
        for link in links {
            if let Some(order) = orders.get(&link.order_id) {
                by_invoice
                    .entry(link.invoice_id)
                    .or_default()
                    .push(order.clone());
            }
        }

        entities
            .into_iter()
            .map(|invoice| {
                let mut orders = by_invoice.remove(&invoice.id).unwrap_or_default();
                orders.sort_by_key(|o| o.id);
                Invoice::from_entity(invoice, orders)
            })
            .collect()
    }
}
