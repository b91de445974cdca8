use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        advertisement::{
            AdClickDto, AdQuery, AdminAdQuery, AdvertisementDto, CreateAdvertisementDto,
            UpdateAdvertisementDto,
        },
        api::{ApiResponse, ErrorDto, IdDto},
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            advertisement::{AdFilter, Advertisement, AdvertisementFields},
            pagination::PageRequest,
        },
        service::advertisement::AdvertisementService,
        state::AppState,
    },
};

/// Tag for grouping advertisement endpoints in OpenAPI documentation
pub static ADVERTISEMENT_TAG: &str = "advertisement";

/// Running ads ordered by `sort_order`. Each returned ad counts one impression.
#[utoipa::path(
    get,
    path = "/api/ads",
    tag = ADVERTISEMENT_TAG,
    params(AdQuery),
    responses(
        (status = 200, description = "Running ads", body = ApiResponse<Vec<AdvertisementDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_running_ads(
    State(state): State<AppState>,
    Query(query): Query<AdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let ads = AdvertisementService::new(&state.db, &state.cache)
        .running(query.position)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            "Advertisements retrieved",
            ads.into_iter()
                .map(Advertisement::into_dto)
                .collect::<Vec<_>>(),
        )),
    ))
}

/// Count a click and return the ad's target.
///
/// # Access Control
/// - Public, rate-limited per client
///
/// # Returns
/// - `200 OK` - The link to follow, if any
/// - `404 Not Found` - Unknown ad or one that is not running
/// - `429 Too Many Requests` - Rate limit exceeded
#[utoipa::path(
    post,
    path = "/api/ads/{id}/click",
    tag = ADVERTISEMENT_TAG,
    params(("id" = i32, Path, description = "Advertisement ID")),
    responses(
        (status = 200, description = "Click recorded", body = ApiResponse<AdClickDto>),
        (status = 404, description = "Advertisement not running", body = ErrorDto),
        (status = 429, description = "Too many requests")
    ),
)]
pub async fn click_ad(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let link_url = AdvertisementService::new(&state.db, &state.cache)
        .click(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Click recorded", AdClickDto { link_url })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/ads",
    tag = ADVERTISEMENT_TAG,
    params(AdminAdQuery),
    responses(
        (status = 200, description = "Page of advertisements", body = ApiResponse<Vec<AdvertisementDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn admin_list_ads(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AdminAdQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let page = PageRequest::new(query.page, query.limit);
    let ads = AdvertisementService::new(&state.db, &state.cache)
        .list(AdFilter::from_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ads.into_envelope("Advertisements retrieved", Advertisement::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/ads/{id}",
    tag = ADVERTISEMENT_TAG,
    params(("id" = i32, Path, description = "Advertisement ID")),
    responses(
        (status = 200, description = "Advertisement with counters", body = ApiResponse<AdvertisementDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Advertisement not found", body = ErrorDto)
    ),
)]
pub async fn admin_get_ad(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let ad = AdvertisementService::new(&state.db, &state.cache)
        .get(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Advertisement retrieved", ad.into_dto())),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/ads",
    tag = ADVERTISEMENT_TAG,
    request_body = CreateAdvertisementDto,
    responses(
        (status = 201, description = "Advertisement created", body = ApiResponse<AdvertisementDto>),
        (status = 400, description = "Invalid advertisement", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn create_ad(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateAdvertisementDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let ad = AdvertisementService::new(&state.db, &state.cache)
        .create(AdvertisementFields::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Advertisement created", ad.into_dto())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/ads/{id}",
    tag = ADVERTISEMENT_TAG,
    params(("id" = i32, Path, description = "Advertisement ID")),
    request_body = UpdateAdvertisementDto,
    responses(
        (status = 200, description = "Advertisement updated", body = ApiResponse<AdvertisementDto>),
        (status = 400, description = "Invalid advertisement", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Advertisement not found", body = ErrorDto)
    ),
)]
pub async fn update_ad(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAdvertisementDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let ad = AdvertisementService::new(&state.db, &state.cache)
        .update(id, payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Advertisement updated", ad.into_dto())),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/ads/{id}",
    tag = ADVERTISEMENT_TAG,
    params(("id" = i32, Path, description = "Advertisement ID")),
    responses(
        (status = 200, description = "Advertisement deleted", body = ApiResponse<IdDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Advertisement not found", body = ErrorDto)
    ),
)]
pub async fn delete_ad(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    AdvertisementService::new(&state.db, &state.cache)
        .delete(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Advertisement deleted", IdDto { id })),
    ))
}
