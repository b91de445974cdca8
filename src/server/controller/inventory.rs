use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        inventory::{CreateMovementDto, InventoryMovementDto, LowStockQuery, MovementQuery},
        product::ProductDto,
    },
    server::{
        controller::extract::{Json, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            inventory::{CreateMovementParam, InventoryMovement, MovementFilter},
            pagination::PageRequest,
            product::Product,
        },
        service::inventory::InventoryService,
        state::AppState,
    },
};

/// Tag for grouping inventory endpoints in OpenAPI documentation
pub static INVENTORY_TAG: &str = "inventory";

/// Record a manual stock movement.
///
/// Only `import`, `export` and `adjustment` are accepted; `sale` and `return` are
/// written by the order flow. The stock change and the movement row are saved together.
///
/// # Access Control
/// - `Admin` - The acting admin is stored on the movement
///
/// # Returns
/// - `201 Created` - The recorded movement with stock before and after
/// - `400 Bad Request` - Reserved kind, invalid quantity, or insufficient stock
/// - `404 Not Found` - Unknown product
#[utoipa::path(
    post,
    path = "/api/admin/inventory/movements",
    tag = INVENTORY_TAG,
    request_body = CreateMovementDto,
    responses(
        (status = 201, description = "Movement recorded", body = ApiResponse<InventoryMovementDto>),
        (status = 400, description = "Invalid movement", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto)
    ),
)]
pub async fn create_movement(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateMovementDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let movement = InventoryService::new(&state.db, &state.cache)
        .create_movement(CreateMovementParam::from_dto(admin.id, payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Movement recorded", movement.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/inventory/movements",
    tag = INVENTORY_TAG,
    params(MovementQuery),
    responses(
        (status = 200, description = "Movements, newest first", body = ApiResponse<Vec<InventoryMovementDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn list_movements(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<MovementQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let page = PageRequest::new(query.page, query.limit);
    let movements = InventoryService::new(&state.db, &state.cache)
        .list(MovementFilter::from_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(movements.into_envelope("Movements retrieved", InventoryMovement::into_dto)),
    ))
}

/// Active products at or below the threshold, lowest stock first.
///
/// The threshold defaults to the configured `LOW_STOCK_THRESHOLD`.
#[utoipa::path(
    get,
    path = "/api/admin/inventory/low-stock",
    tag = INVENTORY_TAG,
    params(LowStockQuery),
    responses(
        (status = 200, description = "Low-stock products", body = ApiResponse<Vec<ProductDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn low_stock(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LowStockQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let threshold = query
        .threshold
        .unwrap_or(state.shop.low_stock_threshold);
    let page = PageRequest::new(query.page, query.limit);
    let products = InventoryService::new(&state.db, &state.cache)
        .low_stock(threshold, page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(products.into_envelope("Low-stock products retrieved", Product::into_dto)),
    ))
}
