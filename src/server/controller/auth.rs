use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        user::{ChangePasswordDto, LoginDto, RegisterDto, UpdateProfileDto, UserDto},
    },
    server::{
        controller::extract::Json,
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        model::user::{RegisterParam, UpdateProfileParam},
        service::{auth::AuthService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a customer account.
///
/// Creates a non-admin user and logs them in by storing their id in the session.
///
/// # Access Control
/// - Public
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `session` - Session the new user is logged into
/// - `payload` - Email, name, password and optional phone
///
/// # Returns
/// - `201 Created` - The new user
/// - `400 Bad Request` - Malformed email or a password shorter than 8 characters
/// - `409 Conflict` - Email already registered
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered and logged in", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 429, description = "Too many attempts"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .register(RegisterParam::from_dto(payload))
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Registered successfully", user.into_dto())),
    ))
}

/// Log in with email and password.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - The logged-in user
/// - `401 Unauthorized` - Email and password do not match
/// - `403 Forbidden` - Account disabled
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<UserDto>),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 403, description = "Account is disabled", body = ErrorDto),
        (status = 429, description = "Too many attempts"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .login(&payload.email, &payload.password)
        .await?;

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Logged in successfully", user.into_dto())),
    ))
}

/// Log out by clearing the session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<Option<UserDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::<Option<UserDto>>::ok("Logged out", None)),
    ))
}

/// Get the currently logged-in user.
///
/// # Access Control
/// - Any authenticated, active user
///
/// # Returns
/// - `200 OK` - The current user
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Account disabled
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Account is disabled", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Current user", user.into_dto())),
    ))
}

/// Update the current user's name or phone.
#[utoipa::path(
    put,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let user = UserService::new(&state.db)
        .update_profile(user.id, UpdateProfileParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Profile updated", user.into_dto())),
    ))
}

/// Change the current user's password.
///
/// # Access Control
/// - Any authenticated, active user
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - New password shorter than 8 characters
/// - `401 Unauthorized` - Not logged in, or the current password is wrong
#[utoipa::path(
    put,
    path = "/api/auth/password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<UserDto>),
        (status = 400, description = "New password too short", body = ErrorDto),
        (status = 401, description = "Current password is wrong", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    AuthService::new(&state.db)
        .change_password(user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Password changed", user.into_dto())),
    ))
}
