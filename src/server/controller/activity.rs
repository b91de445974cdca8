use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use tower_sessions::Session;

use crate::{
    model::{
        activity::{ActivityDto, ActivityQuery, CreateActivityDto, UpdateActivityDto},
        api::{ApiResponse, ErrorDto, IdDto},
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{activity::ActivityFields, pagination::PageRequest},
        service::activity::ActivityService,
        state::AppState,
    },
};

/// Tag for grouping activity endpoints in OpenAPI documentation
pub static ACTIVITY_TAG: &str = "activity";

/// Enabled activities ordered by start time, optionally by derived status.
#[utoipa::path(
    get,
    path = "/api/activities",
    tag = ACTIVITY_TAG,
    params(ActivityQuery),
    responses(
        (status = 200, description = "Page of activities", body = ApiResponse<Vec<ActivityDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let page = PageRequest::new(query.page, query.limit);
    let activities = ActivityService::new(&state.db, &state.cache)
        .list(query.status, false, page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(activities.into_envelope("Activities retrieved", |a| a.into_dto(now))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/activities/{id}",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity", body = ApiResponse<ActivityDto>),
        (status = 404, description = "Activity not found or disabled", body = ErrorDto)
    ),
)]
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let activity = ActivityService::new(&state.db, &state.cache)
        .get_public(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Activity retrieved", activity.into_dto(Utc::now()))),
    ))
}

/// Every activity including disabled ones.
#[utoipa::path(
    get,
    path = "/api/admin/activities",
    tag = ACTIVITY_TAG,
    params(ActivityQuery),
    responses(
        (status = 200, description = "Page of activities", body = ApiResponse<Vec<ActivityDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn admin_list_activities(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let now = Utc::now();
    let page = PageRequest::new(query.page, query.limit);
    let activities = ActivityService::new(&state.db, &state.cache)
        .list(query.status, true, page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(activities.into_envelope("Activities retrieved", |a| a.into_dto(now))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/activities/{id}",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity", body = ApiResponse<ActivityDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Activity not found", body = ErrorDto)
    ),
)]
pub async fn admin_get_activity(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let activity = ActivityService::new(&state.db, &state.cache).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Activity retrieved", activity.into_dto(Utc::now()))),
    ))
}

/// Create an activity.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The new activity with its derived status
/// - `400 Bad Request` - Empty title, or `end_at` not after `start_at`
#[utoipa::path(
    post,
    path = "/api/admin/activities",
    tag = ACTIVITY_TAG,
    request_body = CreateActivityDto,
    responses(
        (status = 201, description = "Activity created", body = ApiResponse<ActivityDto>),
        (status = 400, description = "Invalid activity", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn create_activity(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateActivityDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let activity = ActivityService::new(&state.db, &state.cache)
        .create(ActivityFields::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Activity created", activity.into_dto(Utc::now()))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/activities/{id}",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    request_body = UpdateActivityDto,
    responses(
        (status = 200, description = "Activity updated", body = ApiResponse<ActivityDto>),
        (status = 400, description = "Invalid activity", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Activity not found", body = ErrorDto)
    ),
)]
pub async fn update_activity(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateActivityDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let activity = ActivityService::new(&state.db, &state.cache)
        .update(id, payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Activity updated", activity.into_dto(Utc::now()))),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/activities/{id}",
    tag = ACTIVITY_TAG,
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity deleted", body = ApiResponse<IdDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Activity not found", body = ErrorDto)
    ),
)]
pub async fn delete_activity(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    ActivityService::new(&state.db, &state.cache)
        .delete(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Activity deleted", IdDto { id })),
    ))
}
