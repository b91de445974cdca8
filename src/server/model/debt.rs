//! Debt ledger model: status derivation and aggregate summary.

use chrono::{DateTime, Utc};

use crate::model::debt::{
    CreateDebtDto, DebtDto, DebtItemDto, DebtPaymentDto, DebtQuery, DebtStatus, DebtSummaryDto,
    RecordPaymentDto,
};
use crate::server::{error::AppError, util::parse::parse_enum};

/// Derives the status of a non-cancelled debt. First match wins:
/// `paid` when fully covered, then `overdue` past the due date, then `partial`
/// when anything was paid, otherwise `unpaid`.
pub fn derive_status(
    total: i64,
    paid: i64,
    due_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> DebtStatus {
    if paid >= total {
        DebtStatus::Paid
    } else if due_date.is_some_and(|due| due < now) {
        DebtStatus::Overdue
    } else if paid > 0 {
        DebtStatus::Partial
    } else {
        DebtStatus::Unpaid
    }
}

impl DebtStatus {
    /// Still collecting payments.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            DebtStatus::Unpaid | DebtStatus::Partial | DebtStatus::Overdue
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebtItem {
    pub id: i32,
    pub order_id: i32,
    pub amount: i64,
}

impl DebtItem {
    pub fn from_entity(entity: entity::debt_item::Model) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            amount: entity.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebtPayment {
    pub id: i32,
    pub amount: i64,
    pub method: String,
    pub note: Option<String>,
    pub recorded_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl DebtPayment {
    pub fn from_entity(entity: entity::debt_payment::Model) -> Self {
        Self {
            id: entity.id,
            amount: entity.amount,
            method: entity.method,
            note: entity.note,
            recorded_by: entity.recorded_by,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    pub id: i32,
    pub user_id: i32,
    pub total_amount: i64,
    pub paid_amount: i64,
    pub status: DebtStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub items: Vec<DebtItem>,
    pub payments: Vec<DebtPayment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Debt {
    pub fn from_entity(
        entity: entity::debt::Model,
        items: Vec<entity::debt_item::Model>,
        payments: Vec<entity::debt_payment::Model>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            total_amount: entity.total_amount,
            paid_amount: entity.paid_amount,
            status: parse_enum(&entity.status)?,
            due_date: entity.due_date,
            note: entity.note,
            items: items.into_iter().map(DebtItem::from_entity).collect(),
            payments: payments.into_iter().map(DebtPayment::from_entity).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn outstanding(&self) -> i64 {
        (self.total_amount - self.paid_amount).max(0)
    }

    pub fn into_dto(self) -> DebtDto {
        let outstanding = self.outstanding();

        DebtDto {
            id: self.id,
            user_id: self.user_id,
            total_amount: self.total_amount,
            paid_amount: self.paid_amount,
            outstanding,
            status: self.status,
            due_date: self.due_date,
            note: self.note,
            items: self
                .items
                .into_iter()
                .map(|i| DebtItemDto {
                    id: i.id,
                    order_id: i.order_id,
                    amount: i.amount,
                })
                .collect(),
            payments: self
                .payments
                .into_iter()
                .map(|p| DebtPaymentDto {
                    id: p.id,
                    amount: p.amount,
                    method: p.method,
                    note: p.note,
                    recorded_by: p.recorded_by,
                    created_at: p.created_at,
                })
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DebtItemParam {
    pub order_id: i32,
    pub amount: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct CreateDebtParam {
    pub user_id: i32,
    pub items: Vec<DebtItemParam>,
    pub due_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl CreateDebtParam {
    pub fn from_dto(dto: CreateDebtDto) -> Self {
        Self {
            user_id: dto.user_id,
            items: dto
                .items
                .into_iter()
                .map(|i| DebtItemParam {
                    order_id: i.order_id,
                    amount: i.amount,
                })
                .collect(),
            due_date: dto.due_date,
            note: dto.note,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordPaymentParam {
    pub amount: i64,
    pub method: String,
    pub note: Option<String>,
    pub recorded_by: i32,
}

impl RecordPaymentParam {
    pub fn from_dto(recorded_by: i32, dto: RecordPaymentDto) -> Self {
        Self {
            amount: dto.amount,
            method: dto.method.trim().to_string(),
            note: dto.note,
            recorded_by,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DebtFilter {
    pub status: Option<DebtStatus>,
    pub user_id: Option<i32>,
}

impl DebtFilter {
    pub fn from_query(query: &DebtQuery) -> Self {
        Self {
            status: query.status,
            user_id: query.user_id,
        }
    }
}

/// Totals across non-cancelled debts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebtSummary {
    pub total_amount: i64,
    pub paid_amount: i64,
    pub open_count: u64,
    pub overdue_count: u64,
}

impl DebtSummary {
    /// Folds `(total, paid, status)` rows, skipping cancelled debts.
    pub fn from_rows(rows: impl IntoIterator<Item = (i64, i64, DebtStatus)>) -> Self {
        rows.into_iter()
            .filter(|(_, _, status)| *status != DebtStatus::Cancelled)
            .fold(Self::default(), |mut acc, (total, paid, status)| {
                acc.total_amount += total;
                acc.paid_amount += paid;
                if status.is_open() {
                    acc.open_count += 1;
                }
                if status == DebtStatus::Overdue {
                    acc.overdue_count += 1;
                }
                acc
            })
    }

    pub fn outstanding(&self) -> i64 {
        (self.total_amount - self.paid_amount).max(0)
    }

    pub fn into_dto(self) -> DebtSummaryDto {
        DebtSummaryDto {
            total_amount: self.total_amount,
            paid_amount: self.paid_amount,
            outstanding: self.outstanding(),
            open_count: self.open_count,
            overdue_count: self.overdue_count,
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::Duration;

    use super::*;

    mod derive_status {
        use super::*;

        #[test]
        fn paid_wins_even_when_past_due() {
            let now = Utc::now();
            let status = derive_status(100, 100, Some(now - Duration::days(3)), now);

            assert_eq!(status, DebtStatus::Paid);
        }

        #[test]
        fn overdue_before_partial() {
            let now = Utc::now();
            let status = derive_status(100, 40, Some(now - Duration::hours(1)), now);

            assert_eq!(status, DebtStatus::Overdue);
        }

        #[test]
        fn partial_when_some_paid() {
            let now = Utc::now();
            let status = derive_status(100, 40, Some(now + Duration::days(1)), now);

            assert_eq!(status, DebtStatus::Partial);
        }

        #[test]
        fn unpaid_without_due_date() {
            let now = Utc::now();

            assert_eq!(derive_status(100, 0, None, now), DebtStatus::Unpaid);
        }
    }

    #[test]
    fn summary_skips_cancelled() {
        let summary = DebtSummary::from_rows([
            (100, 0, DebtStatus::Unpaid),
            (200, 50, DebtStatus::Overdue),
            (300, 300, DebtStatus::Paid),
            (999, 0, DebtStatus::Cancelled),
        ]);

        assert_eq!(summary.total_amount, 600);
        assert_eq!(summary.paid_amount, 350);
        assert_eq!(summary.outstanding(), 250);
        assert_eq!(summary.open_count, 2);
        assert_eq!(summary.overdue_count, 1);
    }
}
