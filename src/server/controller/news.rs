use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, IdDto},
        news::{CreateNewsDto, NewsDto, NewsQuery, PublishNewsDto, UpdateNewsDto},
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            news::{CreateNewsParam, News, UpdateNewsParam},
            pagination::PageRequest,
        },
        service::news::NewsService,
        state::AppState,
    },
};

/// Tag for grouping news endpoints in OpenAPI documentation
pub static NEWS_TAG: &str = "news";

/// Published articles, most recently published first.
#[utoipa::path(
    get,
    path = "/api/news",
    tag = NEWS_TAG,
    params(NewsQuery),
    responses(
        (status = 200, description = "Page of published articles", body = ApiResponse<Vec<NewsDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::new(query.page, query.limit);
    let news = NewsService::new(&state.db, &state.cache)
        .list(query.search, true, page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(news.into_envelope("News retrieved", News::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/news/{slug}",
    tag = NEWS_TAG,
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Published article", body = ApiResponse<NewsDto>),
        (status = 404, description = "Article not found or unpublished", body = ErrorDto)
    ),
)]
pub async fn get_news(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let news = NewsService::new(&state.db, &state.cache)
        .get_published_by_slug(&slug)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("News retrieved", news.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/news",
    tag = NEWS_TAG,
    params(NewsQuery),
    responses(
        (status = 200, description = "Page of articles", body = ApiResponse<Vec<NewsDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn admin_list_news(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NewsQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let page = PageRequest::new(query.page, query.limit);
    let news = NewsService::new(&state.db, &state.cache)
        .list(query.search, false, page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(news.into_envelope("News retrieved", News::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/news/{id}",
    tag = NEWS_TAG,
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article", body = ApiResponse<NewsDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Article not found", body = ErrorDto)
    ),
)]
pub async fn admin_get_news(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let news = NewsService::new(&state.db, &state.cache).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("News retrieved", news.into_dto())),
    ))
}

/// Write an article. The logged-in admin is recorded as its author.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - The article with rendered HTML
/// - `400 Bad Request` - Missing title or content
#[utoipa::path(
    post,
    path = "/api/admin/news",
    tag = NEWS_TAG,
    request_body = CreateNewsDto,
    responses(
        (status = 201, description = "Article created", body = ApiResponse<NewsDto>),
        (status = 400, description = "Invalid article", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn create_news(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateNewsDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let news = NewsService::new(&state.db, &state.cache)
        .create(CreateNewsParam::from_dto(admin.id, payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("News created", news.into_dto())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/news/{id}",
    tag = NEWS_TAG,
    params(("id" = i32, Path, description = "Article ID")),
    request_body = UpdateNewsDto,
    responses(
        (status = 200, description = "Article updated", body = ApiResponse<NewsDto>),
        (status = 400, description = "Invalid article", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Article not found", body = ErrorDto)
    ),
)]
pub async fn update_news(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateNewsDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let news = NewsService::new(&state.db, &state.cache)
        .update(id, UpdateNewsParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("News updated", news.into_dto())),
    ))
}

/// Publish or unpublish. The first publication date is kept when republishing.
#[utoipa::path(
    put,
    path = "/api/admin/news/{id}/publish",
    tag = NEWS_TAG,
    params(("id" = i32, Path, description = "Article ID")),
    request_body = PublishNewsDto,
    responses(
        (status = 200, description = "Publication changed", body = ApiResponse<NewsDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Article not found", body = ErrorDto)
    ),
)]
pub async fn publish_news(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<PublishNewsDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let news = NewsService::new(&state.db, &state.cache)
        .set_published(id, payload.published)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("News publication changed", news.into_dto())),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/news/{id}",
    tag = NEWS_TAG,
    params(("id" = i32, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article deleted", body = ApiResponse<IdDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Article not found", body = ErrorDto)
    ),
)]
pub async fn delete_news(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    NewsService::new(&state.db, &state.cache).delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("News deleted", IdDto { id })),
    ))
}
