//! Invoice model and status machine.

use chrono::{DateTime, Utc};

use crate::model::invoice::{
    CreateInvoiceDto, InvoiceDto, InvoiceOrderDto, InvoiceQuery, InvoiceStatus,
};
use crate::model::order::{OrderStatus, PaymentStatus};
use crate::server::{error::AppError, util::parse::parse_enum};

impl InvoiceStatus {
    /// `draft -> issued | cancelled`, `issued -> paid | cancelled`.
    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        use InvoiceStatus::*;

        matches!(
            (self, next),
            (Draft, Issued) | (Draft, Cancelled) | (Issued, Paid) | (Issued, Cancelled)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceOrder {
    pub id: i32,
    pub code: String,
    pub total: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
}

impl InvoiceOrder {
    pub fn from_entity(order: entity::order::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: order.id,
            code: order.code,
            total: order.total,
            status: parse_enum(&order.status)?,
            payment_status: parse_enum(&order.payment_status)?,
        })
    }

    pub fn into_dto(self) -> InvoiceOrderDto {
        InvoiceOrderDto {
            id: self.id,
            code: self.code,
            total: self.total,
            status: self.status,
            payment_status: self.payment_status,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: i32,
    pub number: String,
    pub user_id: i32,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub orders: Vec<InvoiceOrder>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    pub fn from_entity(
        entity: entity::invoice::Model,
        orders: Vec<entity::order::Model>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            number: entity.number,
            user_id: entity.user_id,
            amount: entity.amount,
            status: parse_enum(&entity.status)?,
            due_date: entity.due_date,
            note: entity.note,
            issued_at: entity.issued_at,
            paid_at: entity.paid_at,
            orders: orders
                .into_iter()
                .map(InvoiceOrder::from_entity)
                .collect::<Result<_, _>>()?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Issued and past its due date.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == InvoiceStatus::Issued && self.due_date.is_some_and(|due| due < now)
    }

    pub fn into_dto(self, now: DateTime<Utc>) -> InvoiceDto {
        let overdue = self.is_overdue(now);

        InvoiceDto {
            id: self.id,
            number: self.number,
            user_id: self.user_id,
            amount: self.amount,
            status: self.status,
            due_date: self.due_date,
            note: self.note,
            issued_at: self.issued_at,
            paid_at: self.paid_at,
            overdue,
            orders: self.orders.into_iter().map(InvoiceOrder::into_dto).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateInvoiceParam {
    pub order_ids: Vec<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl CreateInvoiceParam {
    pub fn from_dto(dto: CreateInvoiceDto) -> Self {
        Self {
            order_ids: dto.order_ids,
            due_date: dto.due_date,
            note: dto.note,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub user_id: Option<i32>,
    /// Customer listings never show drafts.
    pub exclude_drafts: bool,
}

impl InvoiceFilter {
    pub fn from_query(query: &InvoiceQuery) -> Self {
        Self {
            status: query.status,
            user_id: query.user_id,
            exclude_drafts: false,
        }
    }

    pub fn for_user(user_id: i32) -> Self {
        Self {
            status: None,
            user_id: Some(user_id),
            exclude_drafts: true,
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::Duration;

    use super::*;

    fn invoice(status: InvoiceStatus, due_date: Option<DateTime<Utc>>) -> Invoice {
        let now = Utc::now();
        Invoice {
            id: 1,
            number: "INV-202601-0001".to_string(),
            user_id: 1,
            amount: 100,
            status,
            due_date,
            note: None,
            issued_at: None,
            paid_at: None,
            orders: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn transitions() {
        use InvoiceStatus::*;

        assert!(Draft.can_transition_to(Issued));
        assert!(Draft.can_transition_to(Cancelled));
        assert!(Issued.can_transition_to(Paid));
        assert!(Issued.can_transition_to(Cancelled));

        assert!(!Draft.can_transition_to(Paid));
        assert!(!Paid.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Issued));
    }

    #[test]
    fn overdue_only_when_issued_and_past_due() {
        let now = Utc::now();
        let past = Some(now - Duration::days(1));
        let future = Some(now + Duration::days(1));

        assert!(invoice(InvoiceStatus::Issued, past).is_overdue(now));
        assert!(!invoice(InvoiceStatus::Issued, future).is_overdue(now));
        assert!(!invoice(InvoiceStatus::Issued, None).is_overdue(now));
        assert!(!invoice(InvoiceStatus::Draft, past).is_overdue(now));
        assert!(!invoice(InvoiceStatus::Paid, past).is_overdue(now));
    }
}
