use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, CountDto, ErrorDto, IdDto},
        translation::{
            BulkUpsertTranslationDto, BundleQuery, TranslationDto, TranslationQuery,
            UpsertTranslationDto,
        },
    },
    server::{
        controller::extract::{Json, Path, Query},
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::PageRequest,
            translation::{Translation, TranslationFilter, UpsertTranslationParam},
        },
        service::translation::TranslationService,
        state::AppState,
    },
};

/// Tag for grouping translation endpoints in OpenAPI documentation
pub static TRANSLATION_TAG: &str = "translation";

#[utoipa::path(
    get,
    path = "/api/translations/locales",
    tag = TRANSLATION_TAG,
    responses(
        (status = 200, description = "Locales with at least one translation", body = ApiResponse<Vec<String>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_locales(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let locales = TranslationService::new(&state.db, &state.cache)
        .locales()
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Locales retrieved", locales)),
    ))
}

/// Flat `key -> value` map for one locale and namespace (default `common`).
///
/// Bundles are cached until a translation in that locale changes.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `200 OK` - The bundle, possibly empty
/// - `400 Bad Request` - Locale is not of the form `xx` or `xx-XX`
#[utoipa::path(
    get,
    path = "/api/translations/{locale}",
    tag = TRANSLATION_TAG,
    params(
        ("locale" = String, Path, description = "Locale such as `en` or `vi-VN`"),
        BundleQuery
    ),
    responses(
        (status = 200, description = "Translation bundle", body = ApiResponse<BTreeMap<String, String>>),
        (status = 400, description = "Invalid locale", body = ErrorDto)
    ),
)]
pub async fn get_bundle(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    Query(query): Query<BundleQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bundle = TranslationService::new(&state.db, &state.cache)
        .bundle(&locale, query.namespace.as_deref())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Translations retrieved", bundle)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/translations",
    tag = TRANSLATION_TAG,
    params(TranslationQuery),
    responses(
        (status = 200, description = "Page of translations", body = ApiResponse<Vec<TranslationDto>>),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn list_translations(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<TranslationQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let page = PageRequest::new(query.page, query.limit);
    let translations = TranslationService::new(&state.db, &state.cache)
        .list(TranslationFilter::from_query(&query), page)
        .await?;

    Ok((
        StatusCode::OK,
        Json(translations.into_envelope("Translations retrieved", Translation::into_dto)),
    ))
}

/// Create or replace the value of one key.
#[utoipa::path(
    put,
    path = "/api/admin/translations",
    tag = TRANSLATION_TAG,
    request_body = UpsertTranslationDto,
    responses(
        (status = 200, description = "Translation saved", body = ApiResponse<TranslationDto>),
        (status = 400, description = "Invalid locale or empty key", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn upsert_translation(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpsertTranslationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let translation = TranslationService::new(&state.db, &state.cache)
        .upsert(UpsertTranslationParam::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Translation saved", translation.into_dto())),
    ))
}

/// Upsert many keys of one locale and namespace at once.
///
/// Either every entry is saved or none is.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Number of entries saved
/// - `400 Bad Request` - No entries, invalid locale, or an empty key
#[utoipa::path(
    post,
    path = "/api/admin/translations/bulk",
    tag = TRANSLATION_TAG,
    request_body = BulkUpsertTranslationDto,
    responses(
        (status = 200, description = "Translations saved", body = ApiResponse<CountDto>),
        (status = 400, description = "Invalid translations", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto)
    ),
)]
pub async fn bulk_upsert_translations(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BulkUpsertTranslationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let saved = TranslationService::new(&state.db, &state.cache)
        .bulk_upsert(UpsertTranslationParam::from_bulk_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(
            "Translations saved",
            CountDto {
                count: saved as u64,
            },
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/translations/{id}",
    tag = TRANSLATION_TAG,
    params(("id" = i32, Path, description = "Translation ID")),
    responses(
        (status = 200, description = "Translation deleted", body = ApiResponse<IdDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Translation not found", body = ErrorDto)
    ),
)]
pub async fn delete_translation(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    TranslationService::new(&state.db, &state.cache)
        .delete(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Translation deleted", IdDto { id })),
    ))
}
