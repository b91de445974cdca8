use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, IdDto},
        category::{CategoryDto, CategoryQuery, CreateCategoryDto, UpdateCategoryDto},
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            category::{Category, CategoryFilter, CreateCategoryParam, UpdateCategoryParam},
            pagination::PageRequest,
        },
        service::category::CategoryService,
        state::AppState,
    },
};

/// Tag for grouping category endpoints in OpenAPI documentation
pub static CATEGORY_TAG: &str = "category";

/// List categories, optionally only the children of `parent_id`.
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    params(CategoryQuery),
    responses(
        (status = 200, description = "Page of categories", body = ApiResponse<Vec<CategoryDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::new(query.page, query.limit);
    let categories = CategoryService::new(&state.db, &state.cache)
        .list(CategoryFilter::from_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(categories.into_envelope("Categories retrieved", Category::into_dto)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = ApiResponse<CategoryDto>),
        (status = 404, description = "Category not found", body = ErrorDto)
    ),
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let category = CategoryService::new(&state.db, &state.cache).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Category retrieved", category.into_dto())),
    ))
}

/// Create a category.
///
/// # Access Control
/// - `Admin`
///
/// # Arguments
/// - `state` - Application state containing the database connection and cache
/// - `session` - User's session for authentication
/// - `payload` - Name, optional slug, description and parent
///
/// # Returns
/// - `201 Created` - The new category
/// - `400 Bad Request` - Empty name or unknown parent
/// - `409 Conflict` - Name already used
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    tag = CATEGORY_TAG,
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryDto>),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Category name already exists", body = ErrorDto)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let category = CategoryService::new(&state.db, &state.cache)
        .create(CreateCategoryParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Category created", category.into_dto())),
    ))
}

/// Update a category.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Updated category
/// - `400 Bad Request` - Unknown parent, or a parent that would create a cycle
/// - `404 Not Found` - Unknown category
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryDto>),
        (status = 400, description = "Invalid category data", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 409, description = "Category name already exists", body = ErrorDto)
    ),
)]
pub async fn update_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategoryDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let category = CategoryService::new(&state.db, &state.cache)
        .update(id, UpdateCategoryParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Category updated", category.into_dto())),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<IdDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Category not found", body = ErrorDto),
        (status = 409, description = "Category has products or children", body = ErrorDto)
    ),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    CategoryService::new(&state.db, &state.cache).delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Category deleted", IdDto { id })),
    ))
}
