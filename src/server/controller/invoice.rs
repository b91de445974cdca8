use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageQuery},
        invoice::{CreateInvoiceDto, InvoiceDto, InvoiceQuery, UpdateInvoiceStatusDto},
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            invoice::{CreateInvoiceParam, InvoiceFilter},
            pagination::PageRequest,
        },
        service::invoice::InvoiceService,
        state::AppState,
    },
};

/// Tag for grouping invoice endpoints in OpenAPI documentation
pub static INVOICE_TAG: &str = "invoice";

/// Bill one customer for one or more orders.
///
/// The invoice starts as a draft numbered `INV-YYYYMM-NNNN`; its amount is the sum of
/// the order totals.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The draft invoice
/// - `400 Bad Request` - Empty or repeated ids, unknown orders, orders of different
///   customers, or cancelled/returned orders
/// - `409 Conflict` - An order is already on an open invoice
#[utoipa::path(
    post,
    path = "/api/admin/invoices",
    tag = INVOICE_TAG,
    request_body = CreateInvoiceDto,
    responses(
        (status = 201, description = "Invoice created", body = ApiResponse<InvoiceDto>),
        (status = 400, description = "Orders cannot be invoiced", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Order already invoiced", body = ErrorDto)
    ),
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateInvoiceDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let invoice = InvoiceService::new(&state.db)
        .create(CreateInvoiceParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Invoice created", invoice.into_dto(Utc::now()))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/invoices",
    tag = INVOICE_TAG,
    params(InvoiceQuery),
    responses(
        (status = 200, description = "Page of invoices", body = ApiResponse<Vec<InvoiceDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<InvoiceQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let now = Utc::now();
    let page = PageRequest::new(query.page, query.limit);
    let invoices = InvoiceService::new(&state.db)
        .list(InvoiceFilter::from_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(invoices.into_envelope("Invoices retrieved", |invoice| invoice.into_dto(now))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/invoices/{id}",
    tag = INVOICE_TAG,
    params(("id" = i32, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice with order summaries", body = ApiResponse<InvoiceDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Invoice not found", body = ErrorDto)
    ),
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let invoice = InvoiceService::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Invoice retrieved", invoice.into_dto(Utc::now()))),
    ))
}

/// Issue, pay, or cancel an invoice.
///
/// Paying an invoice marks every linked order as paid.
#[utoipa::path(
    put,
    path = "/api/admin/invoices/{id}/status",
    tag = INVOICE_TAG,
    params(("id" = i32, Path, description = "Invoice ID")),
    request_body = UpdateInvoiceStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<InvoiceDto>),
        (status = 400, description = "Illegal transition", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Invoice not found", body = ErrorDto)
    ),
)]
pub async fn update_invoice_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateInvoiceStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let invoice = InvoiceService::new(&state.db)
        .update_status(id, payload.status)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Invoice status updated", invoice.into_dto(Utc::now()))),
    ))
}

/// The logged-in customer's issued, paid and cancelled invoices.
#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = INVOICE_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of own invoices", body = ApiResponse<Vec<InvoiceDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn list_my_invoices(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let now = Utc::now();
    let page = PageRequest::new(query.page, query.limit);
    let invoices = InvoiceService::new(&state.db)
        .list(InvoiceFilter::for_user(user.id), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(invoices.into_envelope("Invoices retrieved", |invoice| invoice.into_dto(now))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    tag = INVOICE_TAG,
    params(("id" = i32, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Own invoice", body = ApiResponse<InvoiceDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Invoice not found", body = ErrorDto)
    ),
)]
pub async fn get_my_invoice(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let invoice = InvoiceService::new(&state.db)
        .get_for_user(user.id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Invoice retrieved", invoice.into_dto(Utc::now()))),
    ))
}
