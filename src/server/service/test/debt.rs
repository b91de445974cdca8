use chrono::{Duration, Utc};

use crate::{
    model::{debt::DebtStatus, order::PaymentStatus},
    server::{
        data::{notification::NotificationRepository, order::OrderRepository},
        error::AppError,
        model::debt::{CreateDebtParam, DebtItemParam, RecordPaymentParam},
        scheduler::overdue::sweep_overdue,
        service::debt::DebtService,
    },
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, sea_query::Expr};
use test_utils::{builder::TestBuilder, factory};

fn debt_for(user_id: i32, order_ids: &[i32]) -> CreateDebtParam {
    CreateDebtParam {
        user_id,
        items: order_ids
            .iter()
            .map(|&order_id| DebtItemParam {
                order_id,
                amount: None,
            })
            .collect(),
        due_date: Some(Utc::now() + Duration::days(14)),
        note: None,
    }
}

fn payment(amount: i64, recorded_by: i32) -> RecordPaymentParam {
    RecordPaymentParam {
        amount,
        method: "bank_transfer".to_string(),
        note: None,
        recorded_by,
    }
}

/// Tests paying a debt off in two installments.
///
/// Expected: `partial` after the first payment, `paid` after the second, with the
/// orders marked paid and the customer notified on creation and settlement
#[tokio::test]
async fn installments_settle_debt_and_orders() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let (customer, product, first) = factory::helpers::create_order_with_dependencies(db).await?;
    let second = factory::create_order(db, customer.id, &product).await?;

    let service = DebtService::new(db);
    let debt = service
        .create(debt_for(customer.id, &[first.id, second.id]))
        .await?;
    assert_eq!(debt.status, DebtStatus::Unpaid);
    assert_eq!(debt.total_amount, first.total + second.total);

    let debt = service.record_payment(debt.id, payment(50_000, admin.id)).await?;
    assert_eq!(debt.status, DebtStatus::Partial);
    assert_eq!(debt.paid_amount, 50_000);

    let rest = debt.total_amount - debt.paid_amount;
    let debt = service.record_payment(debt.id, payment(rest, admin.id)).await?;
    assert_eq!(debt.status, DebtStatus::Paid);
    assert_eq!(debt.payments.len(), 2);

    let orders = OrderRepository::new(db)
        .find_by_ids(&[first.id, second.id])
        .await?;
    assert!(orders.iter().all(|o| o.payment_status == PaymentStatus::Paid));
    assert_eq!(NotificationRepository::new(db).unread_count(customer.id).await?, 2);

    Ok(())
}

/// Tests paying more than is outstanding and paying a settled debt.
///
/// Expected: Err(AppError::BadRequest) in both cases
#[tokio::test]
async fn rejects_overpayment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let (customer, _, order) = factory::helpers::create_order_with_dependencies(db).await?;

    let service = DebtService::new(db);
    let debt = service.create(debt_for(customer.id, &[order.id])).await?;

    let over = service
        .record_payment(debt.id, payment(debt.total_amount + 1, admin.id))
        .await;
    assert!(matches!(over, Err(AppError::BadRequest(_))));

    service
        .record_payment(debt.id, payment(debt.total_amount, admin.id))
        .await?;
    let after_settled = service.record_payment(debt.id, payment(1, admin.id)).await;
    assert!(matches!(after_settled, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests the order checks on debt creation.
///
/// Expected: Err(AppError::BadRequest) for someone else's order, a paid order and an
/// amount above the order total; Err(AppError::Conflict) for an order already in an
/// open debt; Err(AppError::NotFound) for an unknown customer
#[tokio::test]
async fn validates_orders_on_create() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (customer, product, order) = factory::helpers::create_order_with_dependencies(db).await?;
    let stranger = factory::create_user(db).await?;
    let paid = factory::order::OrderFactory::new(db, customer.id, &product)
        .payment_status("paid")
        .build()
        .await?;

    let service = DebtService::new(db);

    let foreign = service.create(debt_for(stranger.id, &[order.id])).await;
    assert!(matches!(foreign, Err(AppError::BadRequest(_))));

    let already_paid = service.create(debt_for(customer.id, &[paid.id])).await;
    assert!(matches!(already_paid, Err(AppError::BadRequest(_))));

    let mut too_much = debt_for(customer.id, &[order.id]);
    too_much.items[0].amount = Some(order.total + 1);
    let too_much = service.create(too_much).await;
    assert!(matches!(too_much, Err(AppError::BadRequest(_))));

    let unknown_user = service.create(debt_for(i32::MAX, &[order.id])).await;
    assert!(matches!(unknown_user, Err(AppError::NotFound(_))));

    service.create(debt_for(customer.id, &[order.id])).await?;
    let twice = service.create(debt_for(customer.id, &[order.id])).await;
    assert!(matches!(twice, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests cancelling a debt before and after a payment was recorded.
///
/// Expected: Err(AppError::BadRequest) once paid into, Ok in `cancelled` otherwise
#[tokio::test]
async fn cancel_requires_no_payments() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;
    let (customer, product, first) = factory::helpers::create_order_with_dependencies(db).await?;
    let second = factory::create_order(db, customer.id, &product).await?;

    let service = DebtService::new(db);
    let paid_into = service.create(debt_for(customer.id, &[first.id])).await?;
    let untouched = service.create(debt_for(customer.id, &[second.id])).await?;

    service
        .record_payment(paid_into.id, payment(10_000, admin.id))
        .await?;

    let refused = service.cancel(paid_into.id).await;
    assert!(matches!(refused, Err(AppError::BadRequest(_))));

    let cancelled = service.cancel(untouched.id).await?;
    assert_eq!(cancelled.status, DebtStatus::Cancelled);

    let again = service.cancel(untouched.id).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a debt created already past its due date, and the overdue sweep.
///
/// Expected: the first starts `overdue`; the sweep moves the second once its due
/// date is in the past and reports one changed debt
#[tokio::test]
async fn past_due_debts_become_overdue() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (customer, product, first) = factory::helpers::create_order_with_dependencies(db).await?;
    let second = factory::create_order(db, customer.id, &product).await?;

    let service = DebtService::new(db);

    let mut late = debt_for(customer.id, &[first.id]);
    late.due_date = Some(Utc::now() - Duration::days(1));
    let late = service.create(late).await?;
    assert_eq!(late.status, DebtStatus::Overdue);

    let current = service.create(debt_for(customer.id, &[second.id])).await?;
    assert_eq!(current.status, DebtStatus::Unpaid);

    entity::prelude::Debt::update_many()
        .filter(entity::debt::Column::Id.eq(current.id))
        .col_expr(
            entity::debt::Column::DueDate,
            Expr::value(Utc::now() - Duration::hours(1)),
        )
        .exec(db)
        .await?;

    assert_eq!(sweep_overdue(db).await?, 1);
    assert_eq!(service.get(current.id).await?.status, DebtStatus::Overdue);

    let summary = service.summary(Some(customer.id)).await?;
    assert_eq!(summary.overdue_count, 2);
    assert_eq!(summary.open_count, 2);

    Ok(())
}
