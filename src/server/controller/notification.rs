use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, CountDto, ErrorDto, IdDto},
        notification::{CreateNotificationDto, NotificationDto, NotificationQuery},
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            notification::{Notification, SendNotificationParam},
            pagination::PageRequest,
        },
        service::notification::NotificationService,
        state::AppState,
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notification";

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    params(NotificationQuery),
    responses(
        (status = 200, description = "Own notifications, newest first", body = ApiResponse<Vec<NotificationDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NotificationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let page = PageRequest::new(query.page, query.limit);
    let notifications = NotificationService::new(&state.db)
        .list(user.id, query.unread_only, page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(notifications.into_envelope("Notifications retrieved", Notification::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Number of unread notifications", body = ApiResponse<CountDto>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn unread_count(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let count = NotificationService::new(&state.db)
        .unread_count(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Unread count retrieved", CountDto { count })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = ApiResponse<IdDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Notification not found", body = ErrorDto)
    ),
)]
pub async fn mark_read(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    NotificationService::new(&state.db)
        .mark_read(user.id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Notification marked as read", IdDto { id })),
    ))
}

/// Marks every unread notification of the caller as read and returns how many changed.
#[utoipa::path(
    put,
    path = "/api/notifications/read-all",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Number marked as read", body = ApiResponse<CountDto>),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let count = NotificationService::new(&state.db)
        .mark_all_read(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Notifications marked as read", CountDto { count })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification deleted", body = ApiResponse<IdDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Notification not found", body = ErrorDto)
    ),
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    NotificationService::new(&state.db)
        .delete(user.id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Notification deleted", IdDto { id })),
    ))
}

/// Send a notification to one user, or to every active user when `user_id` is absent.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - Number of notifications created
/// - `400 Bad Request` - Empty title or message
/// - `404 Not Found` - Unknown recipient
#[utoipa::path(
    post,
    path = "/api/admin/notifications",
    tag = NOTIFICATION_TAG,
    request_body = CreateNotificationDto,
    responses(
        (status = 201, description = "Notifications created", body = ApiResponse<CountDto>),
        (status = 400, description = "Invalid notification", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn send_notification(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateNotificationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let count = NotificationService::new(&state.db)
        .send(SendNotificationParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Notifications sent", CountDto { count })),
    ))
}
