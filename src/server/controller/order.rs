use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        order::{
            AdminOrderQuery, CancelOrderDto, OrderDto, OrderQuery, PlaceOrderDto,
            UpdateOrderStatusDto, UpdatePaymentStatusDto,
        },
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            order::{Order, OrderFilter, PlaceOrderParam},
            pagination::PageRequest,
        },
        service::order::OrderService,
        state::AppState,
    },
};

/// Tag for grouping order endpoints in OpenAPI documentation
pub static ORDER_TAG: &str = "order";

/// Place an order for the logged-in customer.
///
/// Prices are snapshotted from each product's effective price, the voucher (if any) is
/// redeemed, shipping is computed against the free-shipping threshold and stock is
/// decremented, all in one transaction.
///
/// # Access Control
/// - Any authenticated, active user
///
/// # Arguments
/// - `state` - Application state containing the database connection, cache and shop settings
/// - `session` - User's session for authentication
/// - `payload` - Lines, optional voucher code, payment method and shipping details
///
/// # Returns
/// - `201 Created` - The placed order with its items
/// - `400 Bad Request` - Empty order, bad quantity, inactive product, insufficient
///   stock, missing shipping details, or an ineligible voucher
/// - `401 Unauthorized` - Not logged in
/// - `404 Not Found` - Unknown voucher code
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = ORDER_TAG,
    request_body = PlaceOrderDto,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderDto>),
        (status = 400, description = "Order cannot be placed", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Voucher not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<PlaceOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let order = OrderService::new(&state.db, &state.cache, state.shop)
        .place(PlaceOrderParam::from_dto(user.id, payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Order placed", order.into_dto())),
    ))
}

/// List the logged-in customer's orders, newest first.
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = ORDER_TAG,
    params(OrderQuery),
    responses(
        (status = 200, description = "Page of own orders", body = ApiResponse<Vec<OrderDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn list_my_orders(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<OrderQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let page = PageRequest::new(query.page, query.limit);
    let orders = OrderService::new(&state.db, &state.cache, state.shop)
        .list(OrderFilter::for_user(user.id, &query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(orders.into_envelope("Orders retrieved", Order::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Own order", body = ApiResponse<OrderDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto)
    ),
)]
pub async fn get_my_order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let order = OrderService::new(&state.db, &state.cache, state.shop)
        .get_for_user(user.id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Order retrieved", order.into_dto())),
    ))
}

/// Cancel one of the customer's own orders while it is still pending.
///
/// # Returns
/// - `200 OK` - Cancelled order; stock and voucher usage are released
/// - `400 Bad Request` - Order is past `pending`
/// - `404 Not Found` - Unknown order or owned by someone else
#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    request_body = CancelOrderDto,
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<OrderDto>),
        (status = 400, description = "Order can no longer be cancelled", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto)
    ),
)]
pub async fn cancel_my_order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<CancelOrderDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let order = OrderService::new(&state.db, &state.cache, state.shop)
        .cancel_by_customer(user.id, id, payload.reason)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Order cancelled", order.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = ORDER_TAG,
    params(AdminOrderQuery),
    responses(
        (status = 200, description = "Page of orders", body = ApiResponse<Vec<OrderDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn admin_list_orders(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AdminOrderQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let page = PageRequest::new(query.page, query.limit);
    let orders = OrderService::new(&state.db, &state.cache, state.shop)
        .list(OrderFilter::from_admin_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(orders.into_envelope("Orders retrieved", Order::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = ApiResponse<OrderDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto)
    ),
)]
pub async fn admin_get_order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let order = OrderService::new(&state.db, &state.cache, state.shop)
        .get(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Order retrieved", order.into_dto())),
    ))
}

/// Move an order through its status machine.
///
/// Cancelling or returning restores stock and releases the voucher usage. Delivering a
/// cash-on-delivery order marks it paid. The owner is notified of every change.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Updated order
/// - `400 Bad Request` - Transition not allowed from the current status
/// - `404 Not Found` - Unknown order
#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<OrderDto>),
        (status = 400, description = "Illegal transition", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto)
    ),
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let order = OrderService::new(&state.db, &state.cache, state.shop)
        .update_status(id, payload.status, payload.reason)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Order status updated", order.into_dto())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/payment",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdatePaymentStatusDto,
    responses(
        (status = 200, description = "Payment status updated", body = ApiResponse<OrderDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto)
    ),
)]
pub async fn update_payment_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePaymentStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let order = OrderService::new(&state.db, &state.cache, state.shop)
        .update_payment_status(id, payload.payment_status)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Payment status updated", order.into_dto())),
    ))
}
