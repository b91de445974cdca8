use chrono::{Duration, Utc};

use crate::{
    model::voucher::DiscountType,
    server::{
        error::AppError,
        model::voucher::{UpdateVoucherParam, VoucherFields},
        service::voucher::VoucherService,
    },
};
use entity::prelude::{User, Voucher, VoucherUsage};
use test_utils::{builder::TestBuilder, factory};

fn fields(code: &str) -> VoucherFields {
    let now = Utc::now();
    VoucherFields {
        code: code.to_string(),
        description: None,
        discount_type: DiscountType::Fixed,
        discount_value: 20_000,
        max_discount: None,
        min_order_value: 0,
        start_at: now - Duration::days(1),
        end_at: now + Duration::days(30),
        usage_limit: None,
        per_user_limit: 1,
        active: true,
    }
}

/// Tests previewing a fixed-amount voucher against a subtotal.
///
/// Expected: Ok with the discount and the amount left to pay
#[tokio::test]
async fn validate_previews_discount() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Voucher)
        .with_table(VoucherUsage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_user(db).await?;
    let voucher = factory::voucher::VoucherFactory::new(db)
        .fixed(50_000)
        .build()
        .await?;

    let validation = VoucherService::new(db)
        .validate(customer.id, &voucher.code, 200_000)
        .await?;

    assert_eq!(validation.discount, 50_000);
    assert_eq!(validation.final_amount, 150_000);

    Ok(())
}

/// Tests previewing with an unknown code, a negative subtotal and one under the minimum.
///
/// Expected: Err(AppError::NotFound), then Err(AppError::BadRequest) twice
#[tokio::test]
async fn validate_rejects_unusable_codes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(User)
        .with_table(Voucher)
        .with_table(VoucherUsage)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_user(db).await?;
    let voucher = factory::voucher::VoucherFactory::new(db)
        .min_order_value(300_000)
        .build()
        .await?;

    let service = VoucherService::new(db);

    let unknown = service.validate(customer.id, "MISSING", 500_000).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    let negative = service.validate(customer.id, &voucher.code, -1).await;
    assert!(matches!(negative, Err(AppError::BadRequest(_))));

    let below_minimum = service.validate(customer.id, &voucher.code, 100_000).await;
    assert!(matches!(below_minimum, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests creating a voucher whose code is already taken.
///
/// Expected: Ok for the first, Err(AppError::Conflict) for the second
#[tokio::test]
async fn create_rejects_duplicate_code() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(Voucher)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = VoucherService::new(db);

    service.create(fields("WELCOME20")).await?;
    let duplicate = service.create(fields("WELCOME20")).await;

    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests renaming and deleting a voucher that customers have already redeemed.
///
/// Expected: Err(AppError::BadRequest) for the rename, Err(AppError::Conflict) for
/// the delete
#[tokio::test]
async fn used_voucher_keeps_its_code_and_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(Voucher)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let voucher = factory::voucher::VoucherFactory::new(db)
        .used_count(3)
        .build()
        .await?;

    let service = VoucherService::new(db);

    let renamed = service
        .update(
            voucher.id,
            UpdateVoucherParam {
                code: Some("RENAMED".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(renamed, Err(AppError::BadRequest(_))));

    let deleted = service.delete(voucher.id).await;
    assert!(matches!(deleted, Err(AppError::Conflict(_))));

    let deactivated = service
        .update(
            voucher.id,
            UpdateVoucherParam {
                active: Some(false),
                ..Default::default()
            },
        )
        .await?;
    assert!(!deactivated.active);

    Ok(())
}

/// Tests removing a voucher's discount cap and usage limit, then leaving them alone.
///
/// Expected: Ok with both cleared, and an unrelated update keeps them cleared
#[tokio::test]
async fn update_can_clear_cap_and_usage_limit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(Voucher)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let voucher = factory::voucher::VoucherFactory::new(db)
        .max_discount(50_000)
        .usage_limit(100)
        .build()
        .await?;

    let service = VoucherService::new(db);

    let kept = service
        .update(
            voucher.id,
            UpdateVoucherParam {
                description: Some("Autumn sale".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(kept.max_discount, Some(50_000));
    assert_eq!(kept.usage_limit, Some(100));

    let cleared = service
        .update(
            voucher.id,
            UpdateVoucherParam {
                max_discount: Some(None),
                usage_limit: Some(None),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(cleared.max_discount, None);
    assert_eq!(cleared.usage_limit, None);

    Ok(())
}
