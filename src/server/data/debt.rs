//! Debt ledger repository: debts, their order items and recorded payments.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::debt::DebtStatus,
    server::{
        error::AppError,
        model::{
            debt::{Debt, DebtFilter, DebtPayment, RecordPaymentParam},
            pagination::{PageRequest, Paginated},
        },
        util::parse::parse_enum,
    },
};

/// Row values for a new debt; item amounts are already resolved.
#[derive(Debug, Clone)]
pub struct NewDebt {
    pub user_id: i32,
    pub status: DebtStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    /// `(order_id, amount)` pairs.
    pub items: Vec<(i32, i64)>,
}

pub struct DebtRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DebtRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a debt with `total_amount` equal to the sum of its items.
    pub async fn create(&self, param: NewDebt) -> Result<Debt, AppError> {
        let now = Utc::now();
        let total: i64 = param.items.iter().map(|(_, amount)| amount).sum();

        let debt = entity::debt::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            total_amount: ActiveValue::Set(total),
            paid_amount: ActiveValue::Set(0),
            status: ActiveValue::Set(param.status.to_string()),
            due_date: ActiveValue::Set(param.due_date),
            note: ActiveValue::Set(param.note),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut items = Vec::with_capacity(param.items.len());
        for (order_id, amount) in param.items {
            let item = entity::debt_item::ActiveModel {
                debt_id: ActiveValue::Set(debt.id),
                order_id: ActiveValue::Set(order_id),
                amount: ActiveValue::Set(amount),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            items.push(item);
        }

        Debt::from_entity(debt, items, Vec::new())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Debt>, AppError> {
        let Some(entity) = entity::prelude::Debt::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        self.with_children(vec![entity]).await.map(|mut d| d.pop())
    }

    /// Inserts a payment row. Totals are updated separately with `set_paid`.
    pub async fn add_payment(
        &self,
        debt_id: i32,
        param: RecordPaymentParam,
    ) -> Result<DebtPayment, AppError> {
        let entity = entity::debt_payment::ActiveModel {
            debt_id: ActiveValue::Set(debt_id),
            amount: ActiveValue::Set(param.amount),
            method: ActiveValue::Set(param.method),
            note: ActiveValue::Set(param.note),
            recorded_by: ActiveValue::Set(Some(param.recorded_by)),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(DebtPayment::from_entity(entity))
    }

    /// Stores the new paid amount and derived status.
    pub async fn set_paid(
        &self,
        id: i32,
        paid_amount: i64,
        status: DebtStatus,
    ) -> Result<Option<Debt>, AppError> {
        self.update_with(id, |active| {
            active.paid_amount = ActiveValue::Set(paid_amount);
            active.status = ActiveValue::Set(status.to_string());
        })
        .await
    }

    pub async fn set_status(&self, id: i32, status: DebtStatus) -> Result<Option<Debt>, AppError> {
        self.update_with(id, |active| {
            active.status = ActiveValue::Set(status.to_string())
        })
        .await
    }

    pub async fn payment_count(&self, debt_id: i32) -> Result<u64, AppError> {
        let count = entity::prelude::DebtPayment::find()
            .filter(entity::debt_payment::Column::DebtId.eq(debt_id))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Of `order_ids`, those already on a debt that is not cancelled.
    pub async fn orders_in_open_debts(&self, order_ids: &[i32]) -> Result<Vec<i32>, AppError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let items = entity::prelude::DebtItem::find()
            .filter(entity::debt_item::Column::OrderId.is_in(order_ids.iter().copied()))
            .all(self.db)
            .await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let debt_ids: HashSet<i32> = items.iter().map(|i| i.debt_id).collect();
        let open: HashSet<i32> = entity::prelude::Debt::find()
            .filter(entity::debt::Column::Id.is_in(debt_ids))
            .filter(entity::debt::Column::Status.ne(DebtStatus::Cancelled.as_str()))
            .all(self.db)
            .await?
            .into_iter()
            .map(|d| d.id)
            .collect();

        let mut taken: Vec<i32> = items
            .into_iter()
            .filter(|i| open.contains(&i.debt_id))
            .map(|i| i.order_id)
            .collect();
        taken.sort_unstable();
        taken.dedup();

        Ok(taken)
    }

    /// Lists debts newest first.
    pub async fn list(
        &self,
        filter: DebtFilter,
        page: PageRequest,
    ) -> Result<Paginated<Debt>, AppError> {
        let mut query = entity::prelude::Debt::find();
        if let Some(status) = filter.status {
            query = query.filter(entity::debt::Column::Status.eq(status.as_str()));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(entity::debt::Column::UserId.eq(user_id));
        }

        let paginator = query
            .order_by_desc(entity::debt::Column::CreatedAt)
            .order_by_desc(entity::debt::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;
        let debts = self.with_children(entities).await?;

        Ok(Paginated::new(debts, page, total))
    }

    /// `(total_amount, paid_amount, status)` for every debt, optionally of one user.
    pub async fn summary_rows(
        &self,
        user_id: Option<i32>,
    ) -> Result<Vec<(i64, i64, DebtStatus)>, AppError> {
        let mut query = entity::prelude::Debt::find()
            .select_only()
            .column(entity::debt::Column::TotalAmount)
            .column(entity::debt::Column::PaidAmount)
            .column(entity::debt::Column::Status);
        if let Some(user_id) = user_id {
            query = query.filter(entity::debt::Column::UserId.eq(user_id));
        }

        let rows = query
            .into_tuple::<(i64, i64, String)>()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(total, paid, status)| Ok((total, paid, parse_enum(&status)?)))
            .collect()
    }

    /// Marks unpaid and partially paid debts past their due date as overdue.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of debts updated
    pub async fn mark_overdue(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = entity::prelude::Debt::update_many()
            .filter(
                entity::debt::Column::Status
                    .is_in([DebtStatus::Unpaid.as_str(), DebtStatus::Partial.as_str()]),
            )
            .filter(entity::debt::Column::DueDate.lt(now))
            .col_expr(
                entity::debt::Column::Status,
                Expr::value(DebtStatus::Overdue.as_str()),
            )
            .col_expr(entity::debt::Column::UpdatedAt, Expr::value(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn update_with(
        &self,
        id: i32,
        apply: impl FnOnce(&mut entity::debt::ActiveModel),
    ) -> Result<Option<Debt>, AppError> {
        let Some(entity) = entity::prelude::Debt::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::debt::ActiveModel = entity.into();
        apply(&mut active);
        active.updated_at = ActiveValue::Set(Utc::now());
        let entity = active.update(self.db).await?;

        self.with_children(vec![entity]).await.map(|mut d| d.pop())
    }

    /// Attaches items and payments (oldest first) to each debt row.
    async fn with_children(&self, entities: Vec<entity::debt::Model>) -> Result<Vec<Debt>, AppError> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = entities.iter().map(|d| d.id).collect();

        let mut items: HashMap<i32, Vec<entity::debt_item::Model>> = HashMap::new();
        for item in entity::prelude::DebtItem::find()
            .filter(entity::debt_item::Column::DebtId.is_in(ids.clone()))
            .order_by_asc(entity::debt_item::Column::Id)
            .all(self.db)
            .await?
        {
            items.entry(item.debt_id).or_default().push(item);
        }

        let mut payments: HashMap<i32, Vec<entity::debt_payment::Model>> = HashMap::new();
        for payment in entity::prelude::DebtPayment::find()
            .filter(entity::debt_payment::Column::DebtId.is_in(ids))
            .order_by_asc(entity::debt_payment::Column::CreatedAt)
            .order_by_asc(entity::debt_payment::Column::Id)
            .all(self.db)
            .await?
        {
            payments.entry(payment.debt_id).or_default().push(payment);
        }

        entities
            .into_iter()
            .map(|debt| {
                let debt_items = items.remove(&debt.id).unwrap_or_default();
                let debt_payments = payments.remove(&debt.id).unwrap_or_default();
                Debt::from_entity(debt, debt_items, debt_payments)
            })
            .collect()
    }
}
