use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        homepage::{HomepageConfigDto, HomepageDto, UpdateHomepageDto},
    },
    server::{
        controller::extract::Json,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::homepage::UpdateHomepageParam,
        service::homepage::HomepageService,
        state::AppState,
    },
};

/// Tag for grouping homepage endpoints in OpenAPI documentation
pub static HOMEPAGE_TAG: &str = "homepage";

/// The composed storefront homepage.
///
/// Featured products and categories are resolved in configured order, alongside the
/// running home banners, the latest news and current or upcoming activities.
#[utoipa::path(
    get,
    path = "/api/homepage",
    tag = HOMEPAGE_TAG,
    responses(
        (status = 200, description = "Homepage", body = ApiResponse<HomepageDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_homepage(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let homepage = HomepageService::new(&state.db, &state.cache).get().await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Homepage retrieved", homepage)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/homepage",
    tag = HOMEPAGE_TAG,
    responses(
        (status = 200, description = "Saved homepage configuration", body = ApiResponse<HomepageConfigDto>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn get_homepage_config(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let config = HomepageService::new(&state.db, &state.cache).config().await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Homepage configuration retrieved", config.into_dto())),
    ))
}

/// Replace the homepage configuration.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Saved configuration
/// - `400 Bad Request` - Empty hero title, or unknown featured product or category ids
#[utoipa::path(
    put,
    path = "/api/admin/homepage",
    tag = HOMEPAGE_TAG,
    request_body = UpdateHomepageDto,
    responses(
        (status = 200, description = "Homepage saved", body = ApiResponse<HomepageConfigDto>),
        (status = 400, description = "Invalid homepage configuration", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn update_homepage(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpdateHomepageDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let config = HomepageService::new(&state.db, &state.cache)
        .update(UpdateHomepageParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Homepage saved", config.into_dto())),
    ))
}
