use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        delivery::{AddDeliveryEventDto, CreateDeliveryDto, DeliveryDto, DeliveryQuery},
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            delivery::{AddDeliveryEventParam, CreateDeliveryParam, Delivery, DeliveryFilter},
            pagination::PageRequest,
        },
        service::delivery::DeliveryService,
        state::AppState,
    },
};

/// Tag for grouping delivery endpoints in OpenAPI documentation
pub static DELIVERY_TAG: &str = "delivery";

/// Hand a confirmed order to a carrier.
///
/// Creates the delivery in `pending` with its first event and moves the order to
/// `shipping`.
///
/// # Access Control
/// - `Admin`
///
/// # Arguments
/// - `state` - Application state containing the database connection and cache
/// - `session` - User's session for authentication
/// - `order_id` - Order being shipped
/// - `payload` - Carrier, tracking code and optional estimated delivery time
///
/// # Returns
/// - `201 Created` - The new delivery
/// - `400 Bad Request` - Order is not `confirmed`, or carrier/tracking code missing
/// - `404 Not Found` - Unknown order
/// - `409 Conflict` - The order already has a delivery
#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/delivery",
    tag = DELIVERY_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    request_body = CreateDeliveryDto,
    responses(
        (status = 201, description = "Delivery created", body = ApiResponse<DeliveryDto>),
        (status = 400, description = "Order cannot be shipped", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 409, description = "Order already has a delivery", body = ErrorDto)
    ),
)]
pub async fn create_delivery(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<i32>,
    Json(payload): Json<CreateDeliveryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let delivery = DeliveryService::new(&state.db, &state.cache)
        .create(CreateDeliveryParam::from_dto(order_id, payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Delivery created", delivery.into_dto())),
    ))
}

/// Append a tracking event.
///
/// `delivered` and `returned` events also move the order to the matching status.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Delivery with all events
/// - `400 Bad Request` - Transition not allowed from the current delivery status
/// - `404 Not Found` - Unknown delivery
#[utoipa::path(
    post,
    path = "/api/admin/deliveries/{id}/events",
    tag = DELIVERY_TAG,
    params(("id" = i32, Path, description = "Delivery ID")),
    request_body = AddDeliveryEventDto,
    responses(
        (status = 200, description = "Event recorded", body = ApiResponse<DeliveryDto>),
        (status = 400, description = "Illegal transition", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Delivery not found", body = ErrorDto)
    ),
)]
pub async fn add_delivery_event(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<AddDeliveryEventDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let delivery = DeliveryService::new(&state.db, &state.cache)
        .add_event(id, AddDeliveryEventParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Delivery event recorded", delivery.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/deliveries",
    tag = DELIVERY_TAG,
    params(DeliveryQuery),
    responses(
        (status = 200, description = "Page of deliveries", body = ApiResponse<Vec<DeliveryDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn list_deliveries(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DeliveryQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let page = PageRequest::new(query.page, query.limit);
    let deliveries = DeliveryService::new(&state.db, &state.cache)
        .list(DeliveryFilter::from_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(deliveries.into_envelope("Deliveries retrieved", Delivery::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/deliveries/{id}",
    tag = DELIVERY_TAG,
    params(("id" = i32, Path, description = "Delivery ID")),
    responses(
        (status = 200, description = "Delivery", body = ApiResponse<DeliveryDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Delivery not found", body = ErrorDto)
    ),
)]
pub async fn get_delivery(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let delivery = DeliveryService::new(&state.db, &state.cache).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Delivery retrieved", delivery.into_dto())),
    ))
}

/// Tracking for an order, events in chronological order.
///
/// Admins can track any order; customers only their own.
#[utoipa::path(
    get,
    path = "/api/orders/{id}/tracking",
    tag = DELIVERY_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Delivery with events", body = ApiResponse<DeliveryDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Order not found or not shipped yet", body = ErrorDto)
    ),
)]
pub async fn track_order(
    State(state): State<AppState>,
    session: Session,
    Path(order_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let delivery = DeliveryService::new(&state.db, &state.cache)
        .tracking(user.id, user.admin, order_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Tracking retrieved", delivery.into_dto())),
    ))
}
