use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, IdDto},
        product::{CreateProductDto, ProductDto, ProductQuery, UpdateProductDto},
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::PageRequest,
            product::{CreateProductParam, Product, ProductFilter, UpdateProductParam},
        },
        service::product::ProductService,
        state::AppState,
    },
};

/// Tag for grouping product endpoints in OpenAPI documentation
pub static PRODUCT_TAG: &str = "product";

/// Search the storefront catalog.
///
/// Only active products are returned. Results are cached per distinct query until a
/// product, brand, or stock change invalidates them.
///
/// # Access Control
/// - Public
///
/// # Arguments
/// - `state` - Application state containing the database connection and cache
/// - `query` - Search text, brand/category/price filters, sort order and pagination
///
/// # Returns
/// - `200 OK` - Page of active products
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/products",
    tag = PRODUCT_TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "Page of active products", body = ApiResponse<Vec<ProductDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = ProductService::new(&state.db, &state.cache)
        .list_public(query)
        .await?;

    Ok((
        StatusCode::OK,
        Json(products.into_envelope("Products retrieved", |product| product)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Active product", body = ApiResponse<ProductDto>),
        (status = 404, description = "Product not found or inactive", body = ErrorDto)
    ),
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::new(&state.db, &state.cache)
        .get_public(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Product retrieved", product)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/slug/{slug}",
    tag = PRODUCT_TAG,
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Active product", body = ApiResponse<ProductDto>),
        (status = 404, description = "Product not found or inactive", body = ErrorDto)
    ),
)]
pub async fn get_product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::new(&state.db, &state.cache)
        .get_public_by_slug(&slug)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Product retrieved", product.into_dto())),
    ))
}

/// List every product, including inactive ones unless `active` is given.
#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = PRODUCT_TAG,
    params(ProductQuery),
    responses(
        (status = 200, description = "Page of products", body = ApiResponse<Vec<ProductDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn admin_list_products(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ProductQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let page = PageRequest::new(query.page, query.limit);
    let products = ProductService::new(&state.db, &state.cache)
        .list(ProductFilter::from_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(products.into_envelope("Products retrieved", Product::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ApiResponse<ProductDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto)
    ),
)]
pub async fn admin_get_product(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let product = ProductService::new(&state.db, &state.cache).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Product retrieved", product.into_dto())),
    ))
}

/// Create a product.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The new product
/// - `400 Bad Request` - Invalid price, sale price, stock, or unknown brand/category
/// - `409 Conflict` - SKU already used
#[utoipa::path(
    post,
    path = "/api/admin/products",
    tag = PRODUCT_TAG,
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductDto>),
        (status = 400, description = "Invalid product data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "SKU already exists", body = ErrorDto)
    ),
)]
pub async fn create_product(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateProductDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let product = ProductService::new(&state.db, &state.cache)
        .create(CreateProductParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Product created", product.into_dto())),
    ))
}

/// Update a product. Stock only changes through inventory movements.
#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductDto>),
        (status = 400, description = "Invalid product data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 409, description = "SKU already exists", body = ErrorDto)
    ),
)]
pub async fn update_product(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let product = ProductService::new(&state.db, &state.cache)
        .update(id, UpdateProductParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Product updated", product.into_dto())),
    ))
}

/// Delete a product that was never ordered. Ordered products should be deactivated.
#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<IdDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 409, description = "Product has been ordered", body = ErrorDto)
    ),
)]
pub async fn delete_product(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    ProductService::new(&state.db, &state.cache).delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Product deleted", IdDto { id })),
    ))
}
