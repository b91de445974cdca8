//! Voucher administration and redemption.
//!
//! [`evaluate`] is the single entry point for applying a code to a subtotal. The
//! validate endpoint runs it on the pool; order placement runs it inside the order
//! transaction so the usage count it checks is the one the usage insert relies on.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::server::{
    data::voucher::VoucherRepository,
    error::AppError,
    model::{
        pagination::{PageRequest, Paginated},
        voucher::{
            normalize_code, UpdateVoucherParam, Voucher, VoucherFields, VoucherFilter,
            VoucherUsage, VoucherValidation,
        },
    },
};

/// A voucher that passed eligibility for one subtotal.
#[derive(Debug, Clone)]
pub struct AppliedVoucher {
    pub voucher: Voucher,
    pub discount: i64,
}

/// Looks up `code` and checks it for `user_id` and `subtotal` at `now`.
///
/// # Returns
/// - `Ok(AppliedVoucher)` - Eligible, with the computed discount
/// - `Err(AppError::NotFound)` - No voucher has this code
/// - `Err(AppError::BadRequest)` - The first eligibility rule that failed
pub async fn evaluate<C: ConnectionTrait>(
    db: &C,
    code: &str,
    user_id: i32,
    subtotal: i64,
    now: DateTime<Utc>,
) -> Result<AppliedVoucher, AppError> {
    let repo = VoucherRepository::new(db);

    let voucher = repo
        .find_by_code(&normalize_code(code))
        .await?
        .ok_or_else(|| AppError::not_found("Voucher"))?;

    let used = repo.user_usage_count(voucher.id, user_id).await?;
    voucher
        .check_eligibility(used, subtotal, now)
        .map_err(|reason| AppError::BadRequest(reason.to_string()))?;

    let discount = voucher.compute_discount(subtotal);

    Ok(AppliedVoucher { voucher, discount })
}

pub struct VoucherService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VoucherService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Previews `code` against `subtotal` without redeeming it.
    pub async fn validate(
        &self,
        user_id: i32,
        code: &str,
        subtotal: i64,
    ) -> Result<VoucherValidation, AppError> {
        if subtotal < 0 {
            return Err(AppError::BadRequest(
                "Subtotal cannot be negative".to_string(),
            ));
        }

        let now = Utc::now();
        let applied = evaluate(self.db, code, user_id, subtotal, now).await?;

        Ok(VoucherValidation {
            status: applied.voucher.status(now),
            code: applied.voucher.code,
            discount: applied.discount,
            final_amount: subtotal - applied.discount,
        })
    }

    pub async fn list_available(&self) -> Result<Vec<Voucher>, AppError> {
        VoucherRepository::new(self.db)
            .list_available(Utc::now())
            .await
    }

    pub async fn list(
        &self,
        filter: VoucherFilter,
        page: PageRequest,
    ) -> Result<Paginated<Voucher>, AppError> {
        VoucherRepository::new(self.db)
            .list(filter, page, Utc::now())
            .await
    }

    /// The voucher with its usages, newest first.
    pub async fn get_detail(&self, id: i32) -> Result<(Voucher, Vec<VoucherUsage>), AppError> {
        let repo = VoucherRepository::new(self.db);

        let voucher = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Voucher"))?;
        let usages = repo.usages(id).await?;

        Ok((voucher, usages))
    }

    pub async fn create(&self, fields: VoucherFields) -> Result<Voucher, AppError> {
        fields.validate().map_err(AppError::BadRequest)?;

        let repo = VoucherRepository::new(self.db);
        if repo.code_taken(&fields.code, None).await? {
            return Err(AppError::Conflict(format!(
                "Voucher code '{}' already exists",
                fields.code
            )));
        }

        let voucher = repo.create(fields).await?;
        tracing::info!(voucher_id = voucher.id, code = %voucher.code, "Created voucher");

        Ok(voucher)
    }

    /// Updates a voucher. The code cannot change once the voucher has been used.
    pub async fn update(&self, id: i32, param: UpdateVoucherParam) -> Result<Voucher, AppError> {
        let repo = VoucherRepository::new(self.db);

        let voucher = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Voucher"))?;

        let code_changes = param.code.as_ref().is_some_and(|code| *code != voucher.code);
        if code_changes && voucher.used_count > 0 {
            return Err(AppError::BadRequest(
                "The code of a voucher that has been used cannot change".to_string(),
            ));
        }

        let fields = VoucherFields::merged(&voucher, param);
        fields.validate().map_err(AppError::BadRequest)?;

        if code_changes && repo.code_taken(&fields.code, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "Voucher code '{}' already exists",
                fields.code
            )));
        }

        repo.update(id, fields)
            .await?
            .ok_or_else(|| AppError::not_found("Voucher"))
    }

    /// Deletes an unused voucher.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let repo = VoucherRepository::new(self.db);

        let voucher = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Voucher"))?;

        if voucher.used_count > 0 {
            return Err(AppError::Conflict(
                "Voucher has been used; deactivate it instead".to_string(),
            ));
        }

        repo.delete(id).await?;

        Ok(())
    }
}
