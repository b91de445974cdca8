use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        dashboard::DashboardDto,
    },
    server::{
        controller::extract::Json,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::dashboard::DashboardService,
        state::AppState,
    },
};

/// Tag for grouping dashboard endpoints in OpenAPI documentation
pub static DASHBOARD_TAG: &str = "dashboard";

/// Back office headline figures.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Order counts per status, revenue, catalog and customer counts and the
///   outstanding debt
/// - `401 Unauthorized` / `403 Forbidden` - Not logged in or not an admin
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Dashboard figures", body = ApiResponse<DashboardDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let dashboard = DashboardService::new(&state.db, state.shop)
        .overview()
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok("Dashboard retrieved", dashboard)),
    ))
}
