use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        user::{SetActiveDto, SetAdminDto, UserDto, UserQuery},
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::PageRequest,
            user::{User, UserFilter},
        },
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping user administration endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// List users with optional search by email or name.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Page of users
/// - `401 Unauthorized` / `403 Forbidden` - Not logged in or not an admin
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = USER_TAG,
    params(UserQuery),
    responses(
        (status = 200, description = "Page of users", body = ApiResponse<Vec<UserDto>>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let page = PageRequest::new(query.page, query.limit);
    let users = UserService::new(&state.db)
        .list(UserFilter::from_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(users.into_envelope("Users retrieved", User::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = ApiResponse<UserDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("User retrieved", user.into_dto())),
    ))
}

/// Grant or revoke admin rights.
///
/// # Access Control
/// - `Admin` - An admin cannot revoke their own rights
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - Admin tried to revoke their own rights
/// - `404 Not Found` - Unknown user
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/admin",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = SetAdminDto,
    responses(
        (status = 200, description = "Admin flag updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Cannot change own admin flag", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn set_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<SetAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .set_admin(actor.id, id, payload.admin)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Admin flag updated", user.into_dto())),
    ))
}

/// Enable or disable an account. Disabled users fail every authenticated request.
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/active",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = SetActiveDto,
    responses(
        (status = 200, description = "Account status updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Cannot disable own account", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn set_active(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<SetActiveDto>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .set_active(actor.id, id, payload.active)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Account status updated", user.into_dto())),
    ))
}
