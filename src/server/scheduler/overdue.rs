use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{debt::DebtService, invoice::InvoiceService},
};

/// Starts the overdue sweep scheduler
///
/// Runs at the top of every hour and:
/// - Marks unpaid and partially paid debts past their due date as overdue
/// - Logs how many issued invoices are past due
///
/// # Arguments
/// - `db`: Database connection
pub async fn start_scheduler(db: DatabaseConnection) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = sweep_overdue(&db).await {
                tracing::error!("Error running overdue sweep: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Overdue sweep scheduler started");

    Ok(scheduler)
}

/// One pass of the sweep. Returns the number of debts newly marked overdue.
pub async fn sweep_overdue(db: &DatabaseConnection) -> Result<u64, AppError> {
    let marked = DebtService::new(db).mark_overdue().await?;
    if marked > 0 {
        tracing::info!(count = marked, "Marked debts overdue");
    }

    let overdue_invoices = InvoiceService::new(db).count_overdue().await?;
    if overdue_invoices > 0 {
        tracing::warn!(count = overdue_invoices, "Issued invoices past due");
    }

    Ok(marked)
}
