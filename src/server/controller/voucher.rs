use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, IdDto},
        voucher::{
            CreateVoucherDto, UpdateVoucherDto, ValidateVoucherDto, VoucherDetailDto, VoucherDto,
            VoucherQuery, VoucherValidationDto,
        },
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::PageRequest,
            voucher::{UpdateVoucherParam, VoucherFields, VoucherFilter, VoucherUsage},
        },
        service::voucher::VoucherService,
        state::AppState,
    },
};

/// Tag for grouping voucher endpoints in OpenAPI documentation
pub static VOUCHER_TAG: &str = "voucher";

/// Vouchers that can currently be redeemed.
#[utoipa::path(
    get,
    path = "/api/vouchers/available",
    tag = VOUCHER_TAG,
    responses(
        (status = 200, description = "Active vouchers", body = ApiResponse<Vec<VoucherDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_available_vouchers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let vouchers = VoucherService::new(&state.db).list_available().await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            "Available vouchers retrieved",
            vouchers
                .into_iter()
                .map(|voucher| voucher.into_dto(now))
                .collect::<Vec<_>>(),
        )),
    ))
}

/// Preview a voucher against a subtotal without redeeming it.
///
/// # Access Control
/// - Any authenticated, active user; the per-user limit is checked for the caller
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - User's session for authentication
/// - `payload` - Voucher code and order subtotal
///
/// # Returns
/// - `200 OK` - Discount and amount after discount
/// - `400 Bad Request` - The voucher is not active, the subtotal is below the minimum,
///   or the caller already used it up
/// - `404 Not Found` - Unknown code
/// - `429 Too Many Requests` - Rate limit exceeded
#[utoipa::path(
    post,
    path = "/api/vouchers/validate",
    tag = VOUCHER_TAG,
    request_body = ValidateVoucherDto,
    responses(
        (status = 200, description = "Voucher applies", body = ApiResponse<VoucherValidationDto>),
        (status = 400, description = "Voucher not applicable", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Voucher not found", body = ErrorDto),
        (status = 429, description = "Too many requests")
    ),
)]
pub async fn validate_voucher(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ValidateVoucherDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let validation = VoucherService::new(&state.db)
        .validate(user.id, &payload.code, payload.subtotal)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Voucher is valid", validation.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/vouchers",
    tag = VOUCHER_TAG,
    params(VoucherQuery),
    responses(
        (status = 200, description = "Page of vouchers", body = ApiResponse<Vec<VoucherDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn list_vouchers(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<VoucherQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let now = Utc::now();
    let page = PageRequest::new(query.page, query.limit);
    let vouchers = VoucherService::new(&state.db)
        .list(VoucherFilter::from_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(vouchers.into_envelope("Vouchers retrieved", |voucher| voucher.into_dto(now))),
    ))
}

/// Voucher with its redemption history.
#[utoipa::path(
    get,
    path = "/api/admin/vouchers/{id}",
    tag = VOUCHER_TAG,
    params(("id" = i32, Path, description = "Voucher ID")),
    responses(
        (status = 200, description = "Voucher with usages", body = ApiResponse<VoucherDetailDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Voucher not found", body = ErrorDto)
    ),
)]
pub async fn get_voucher(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let (voucher, usages) = VoucherService::new(&state.db).get_detail(id).await?;

    let detail = VoucherDetailDto {
        voucher: voucher.into_dto(Utc::now()),
        usage_count: usages.len() as u64,
        usages: usages.into_iter().map(VoucherUsage::into_dto).collect(),
    };

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Voucher retrieved", detail)),
    ))
}

/// Create a voucher. Codes are stored uppercase and must be unique.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The new voucher
/// - `400 Bad Request` - Invalid window, value, or limits
/// - `409 Conflict` - Code already exists
#[utoipa::path(
    post,
    path = "/api/admin/vouchers",
    tag = VOUCHER_TAG,
    request_body = CreateVoucherDto,
    responses(
        (status = 201, description = "Voucher created", body = ApiResponse<VoucherDto>),
        (status = 400, description = "Invalid voucher", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Code already exists", body = ErrorDto)
    ),
)]
pub async fn create_voucher(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateVoucherDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let voucher = VoucherService::new(&state.db)
        .create(VoucherFields::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Voucher created", voucher.into_dto(Utc::now()))),
    ))
}

/// Update a voucher. The code cannot change once the voucher has been used.
#[utoipa::path(
    put,
    path = "/api/admin/vouchers/{id}",
    tag = VOUCHER_TAG,
    params(("id" = i32, Path, description = "Voucher ID")),
    request_body = UpdateVoucherDto,
    responses(
        (status = 200, description = "Voucher updated", body = ApiResponse<VoucherDto>),
        (status = 400, description = "Invalid voucher", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Voucher not found", body = ErrorDto),
        (status = 409, description = "Code already exists", body = ErrorDto)
    ),
)]
pub async fn update_voucher(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateVoucherDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let voucher = VoucherService::new(&state.db)
        .update(id, UpdateVoucherParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Voucher updated", voucher.into_dto(Utc::now()))),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/vouchers/{id}",
    tag = VOUCHER_TAG,
    params(("id" = i32, Path, description = "Voucher ID")),
    responses(
        (status = 200, description = "Voucher deleted", body = ApiResponse<IdDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Voucher not found", body = ErrorDto),
        (status = 409, description = "Voucher has been used", body = ErrorDto)
    ),
)]
pub async fn delete_voucher(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    VoucherService::new(&state.db).delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Voucher deleted", IdDto { id })),
    ))
}
