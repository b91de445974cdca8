use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, IdDto},
        brand::{BrandDto, BrandQuery, CreateBrandDto, UpdateBrandDto},
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            brand::{Brand, CreateBrandParam, UpdateBrandParam},
            pagination::PageRequest,
        },
        service::brand::BrandService,
        state::AppState,
    },
};

/// Tag for grouping brand endpoints in OpenAPI documentation
pub static BRAND_TAG: &str = "brand";

#[utoipa::path(
    get,
    path = "/api/brands",
    tag = BRAND_TAG,
    params(BrandQuery),
    responses(
        (status = 200, description = "Page of brands", body = ApiResponse<Vec<BrandDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_brands(
    State(state): State<AppState>,
    Query(query): Query<BrandQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::new(query.page, query.limit);
    let brands = BrandService::new(&state.db, &state.cache)
        .list(query.search, page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(brands.into_envelope("Brands retrieved", Brand::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/brands/{id}",
    tag = BRAND_TAG,
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand", body = ApiResponse<BrandDto>),
        (status = 404, description = "Brand not found", body = ErrorDto)
    ),
)]
pub async fn get_brand(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let brand = BrandService::new(&state.db, &state.cache).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Brand retrieved", brand.into_dto())),
    ))
}

/// Create a brand.
///
/// The slug is derived from the name when omitted.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The new brand
/// - `400 Bad Request` - Empty name
/// - `409 Conflict` - Name already used
#[utoipa::path(
    post,
    path = "/api/admin/brands",
    tag = BRAND_TAG,
    request_body = CreateBrandDto,
    responses(
        (status = 201, description = "Brand created", body = ApiResponse<BrandDto>),
        (status = 400, description = "Invalid brand data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Brand name already exists", body = ErrorDto)
    ),
)]
pub async fn create_brand(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateBrandDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let brand = BrandService::new(&state.db, &state.cache)
        .create(CreateBrandParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Brand created", brand.into_dto())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/brands/{id}",
    tag = BRAND_TAG,
    params(("id" = i32, Path, description = "Brand ID")),
    request_body = UpdateBrandDto,
    responses(
        (status = 200, description = "Brand updated", body = ApiResponse<BrandDto>),
        (status = 400, description = "Invalid brand data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Brand not found", body = ErrorDto),
        (status = 409, description = "Brand name already exists", body = ErrorDto)
    ),
)]
pub async fn update_brand(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBrandDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let brand = BrandService::new(&state.db, &state.cache)
        .update(id, UpdateBrandParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Brand updated", brand.into_dto())),
    ))
}

/// Delete a brand. Refused while any product still references it.
#[utoipa::path(
    delete,
    path = "/api/admin/brands/{id}",
    tag = BRAND_TAG,
    params(("id" = i32, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand deleted", body = ApiResponse<IdDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Brand not found", body = ErrorDto),
        (status = 409, description = "Brand still has products", body = ErrorDto)
    ),
)]
pub async fn delete_brand(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    BrandService::new(&state.db, &state.cache).delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Brand deleted", IdDto { id })),
    ))
}
