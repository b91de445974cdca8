use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue};

use crate::{
    model::{invoice::InvoiceStatus, order::PaymentStatus},
    server::{
        data::{notification::NotificationRepository, order::OrderRepository},
        error::AppError,
        model::invoice::CreateInvoiceParam,
        service::invoice::InvoiceService,
        util::code::{invoice_number, invoice_prefix},
    },
};
use test_utils::{builder::TestBuilder, factory};

fn invoice_for(order_ids: Vec<i32>) -> CreateInvoiceParam {
    CreateInvoiceParam {
        order_ids,
        due_date: None,
        note: None,
    }
}

/// Tests invoicing two orders of the same customer, then a third.
///
/// Expected: Ok drafts summing the order totals, numbered in sequence
#[tokio::test]
async fn creates_numbered_drafts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (customer, product, first) = factory::helpers::create_order_with_dependencies(db).await?;
    let second = factory::create_order(db, customer.id, &product).await?;
    let third = factory::create_order(db, customer.id, &product).await?;

    let service = InvoiceService::new(db);

    let invoice = service.create(invoice_for(vec![first.id, second.id])).await?;
    assert_eq!(invoice.status, InvoiceStatus::Draft);
    assert_eq!(invoice.user_id, customer.id);
    assert_eq!(invoice.amount, first.total + second.total);
    assert_eq!(invoice.orders.len(), 2);
    assert!(invoice.number.starts_with("INV-"));
    assert!(invoice.number.ends_with("0001"));

    let next = service.create(invoice_for(vec![third.id])).await?;
    assert!(next.number.ends_with("0002"));

    Ok(())
}

/// Tests invoicing orders of two customers, a repeated id and an already invoiced order.
///
/// Expected: Err(AppError::BadRequest) twice, then Err(AppError::Conflict)
#[tokio::test]
async fn rejects_invalid_order_sets() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, product, order) = factory::helpers::create_order_with_dependencies(db).await?;
    let other_customer = factory::create_user(db).await?;
    let foreign = factory::create_order(db, other_customer.id, &product).await?;

    let service = InvoiceService::new(db);

    let mixed = service.create(invoice_for(vec![order.id, foreign.id])).await;
    assert!(matches!(mixed, Err(AppError::BadRequest(_))));

    let repeated = service.create(invoice_for(vec![order.id, order.id])).await;
    assert!(matches!(repeated, Err(AppError::BadRequest(_))));

    service.create(invoice_for(vec![order.id])).await?;
    let twice = service.create(invoice_for(vec![order.id])).await;
    assert!(matches!(twice, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests issuing and paying an invoice.
///
/// Expected: draft cannot jump to paid; once paid every linked order is paid and the
/// customer was notified on issue and payment
#[tokio::test]
async fn paying_invoice_pays_orders() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (customer, product, first) = factory::helpers::create_order_with_dependencies(db).await?;
    let second = factory::create_order(db, customer.id, &product).await?;

    let service = InvoiceService::new(db);
    let invoice = service.create(invoice_for(vec![first.id, second.id])).await?;

    let skipped = service.update_status(invoice.id, InvoiceStatus::Paid).await;
    assert!(matches!(skipped, Err(AppError::BadRequest(_))));

    let issued = service.update_status(invoice.id, InvoiceStatus::Issued).await?;
    assert_eq!(issued.status, InvoiceStatus::Issued);
    assert!(issued.issued_at.is_some());

    let paid = service.update_status(invoice.id, InvoiceStatus::Paid).await?;
    assert_eq!(paid.status, InvoiceStatus::Paid);
    assert!(paid.paid_at.is_some());

    let orders = OrderRepository::new(db)
        .find_by_ids(&[first.id, second.id])
        .await?;
    assert!(orders.iter().all(|o| o.payment_status == PaymentStatus::Paid));
    assert_eq!(NotificationRepository::new(db).unread_count(customer.id).await?, 2);

    Ok(())
}

/// Tests a customer opening their own draft and issued invoices.
///
/// Expected: Err(AppError::NotFound) while draft, Ok once issued, and
/// Err(AppError::NotFound) for any other customer
#[tokio::test]
async fn customers_only_see_their_issued_invoices() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (customer, _, order) = factory::helpers::create_order_with_dependencies(db).await?;
    let stranger = factory::create_user(db).await?;

    let service = InvoiceService::new(db);
    let invoice = service.create(invoice_for(vec![order.id])).await?;

    let draft = service.get_for_user(customer.id, invoice.id).await;
    assert!(matches!(draft, Err(AppError::NotFound(_))));

    service.update_status(invoice.id, InvoiceStatus::Issued).await?;
    assert_eq!(service.get_for_user(customer.id, invoice.id).await?.id, invoice.id);

    let foreign = service.get_for_user(stranger.id, invoice.id).await;
    assert!(matches!(foreign, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests numbering once the monthly sequence outgrows four digits.
///
/// Expected: Ok with the sequence continuing after the five-digit number
#[tokio::test]
async fn numbering_continues_past_four_digits() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_billing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (customer, _, order) = factory::helpers::create_order_with_dependencies(db).await?;

    let now = Utc::now();
    let prefix = invoice_prefix(now);
    for sequence in [9999, 10000] {
        entity::invoice::ActiveModel {
            number: ActiveValue::Set(invoice_number(&prefix, sequence)),
            user_id: ActiveValue::Set(customer.id),
            amount: ActiveValue::Set(0),
            status: ActiveValue::Set(InvoiceStatus::Draft.to_string()),
            due_date: ActiveValue::Set(None),
            note: ActiveValue::Set(None),
            issued_at: ActiveValue::Set(None),
            paid_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    let invoice = InvoiceService::new(db)
        .create(invoice_for(vec![order.id]))
        .await?;

    assert_eq!(invoice.number, invoice_number(&prefix, 10001));

    Ok(())
}
