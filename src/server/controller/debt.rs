use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageQuery},
        debt::{
            CreateDebtDto, DebtDto, DebtQuery, DebtSummaryDto, DebtSummaryQuery, RecordPaymentDto,
        },
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            debt::{CreateDebtParam, Debt, DebtFilter, RecordPaymentParam},
            pagination::PageRequest,
        },
        service::debt::DebtService,
        state::AppState,
    },
};

/// Tag for grouping debt endpoints in OpenAPI documentation
pub static DEBT_TAG: &str = "debt";

/// Record that a customer owes money for unpaid orders.
///
/// Each item's amount defaults to the order total. The debt starts `unpaid`, or
/// `overdue` when the due date has already passed.
///
/// # Access Control
/// - `Admin`
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Customer, items (order and optional amount), due date and note
///
/// # Returns
/// - `201 Created` - The new debt with its items
/// - `400 Bad Request` - No items, repeated orders, foreign/cancelled/paid orders, or an
///   amount outside `1..=order.total`
/// - `404 Not Found` - Unknown customer
/// - `409 Conflict` - An order is already in an open debt
#[utoipa::path(
    post,
    path = "/api/admin/debts",
    tag = DEBT_TAG,
    request_body = CreateDebtDto,
    responses(
        (status = 201, description = "Debt created", body = ApiResponse<DebtDto>),
        (status = 400, description = "Invalid debt", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Order already in an open debt", body = ErrorDto)
    ),
)]
pub async fn create_debt(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateDebtDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let debt = DebtService::new(&state.db)
        .create(CreateDebtParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Debt created", debt.into_dto())),
    ))
}

/// Record a payment against an open debt.
///
/// # Access Control
/// - `Admin` - The acting admin is stored as `recorded_by`
///
/// # Returns
/// - `200 OK` - Debt with re-derived status; reaching `paid` marks its orders paid
/// - `400 Bad Request` - Debt cancelled or paid, missing method, or amount not in
///   `1..=outstanding`
/// - `404 Not Found` - Unknown debt
#[utoipa::path(
    post,
    path = "/api/admin/debts/{id}/payments",
    tag = DEBT_TAG,
    params(("id" = i32, Path, description = "Debt ID")),
    request_body = RecordPaymentDto,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<DebtDto>),
        (status = 400, description = "Payment rejected", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Debt not found", body = ErrorDto)
    ),
)]
pub async fn record_payment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<RecordPaymentDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let debt = DebtService::new(&state.db)
        .record_payment(id, RecordPaymentParam::from_dto(admin.id, payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Payment recorded", debt.into_dto())),
    ))
}

/// Cancel a debt that has no payments.
#[utoipa::path(
    post,
    path = "/api/admin/debts/{id}/cancel",
    tag = DEBT_TAG,
    params(("id" = i32, Path, description = "Debt ID")),
    responses(
        (status = 200, description = "Debt cancelled", body = ApiResponse<DebtDto>),
        (status = 400, description = "Debt already cancelled or has payments", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Debt not found", body = ErrorDto)
    ),
)]
pub async fn cancel_debt(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let debt = DebtService::new(&state.db).cancel(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Debt cancelled", debt.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/debts",
    tag = DEBT_TAG,
    params(DebtQuery),
    responses(
        (status = 200, description = "Page of debts", body = ApiResponse<Vec<DebtDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn list_debts(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DebtQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let page = PageRequest::new(query.page, query.limit);
    let debts = DebtService::new(&state.db)
        .list(DebtFilter::from_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(debts.into_envelope("Debts retrieved", Debt::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/debts/{id}",
    tag = DEBT_TAG,
    params(("id" = i32, Path, description = "Debt ID")),
    responses(
        (status = 200, description = "Debt with items and payments", body = ApiResponse<DebtDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Debt not found", body = ErrorDto)
    ),
)]
pub async fn get_debt(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let debt = DebtService::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Debt retrieved", debt.into_dto())),
    ))
}

/// Totals across non-cancelled debts, optionally for one customer.
#[utoipa::path(
    get,
    path = "/api/admin/debts/summary",
    tag = DEBT_TAG,
    params(DebtSummaryQuery),
    responses(
        (status = 200, description = "Debt totals", body = ApiResponse<DebtSummaryDto>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn debt_summary(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DebtSummaryQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let summary = DebtService::new(&state.db).summary(query.user_id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Debt summary retrieved", summary.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/debts",
    tag = DEBT_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of own debts", body = ApiResponse<Vec<DebtDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn list_my_debts(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let filter = DebtFilter {
        user_id: Some(user.id),
        ..Default::default()
    };
    let page = PageRequest::new(query.page, query.limit);
    let debts = DebtService::new(&state.db).list(filter, page).await?;

    Ok((
        StatusCode::OK,
        Json(debts.into_envelope("Debts retrieved", Debt::into_dto)),
    ))
}
