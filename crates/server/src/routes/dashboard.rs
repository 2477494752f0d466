use crate::{
    auth::CurrentUser, dtos::dashboard::DashboardResponse, error::ApiError, state::AppState,
};
use axum::{Json, extract::State};
use chrono::Utc;
use database::services::dashboard::DashboardService;

/// The signed-in user's dashboard, shaped by their role
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dashboard = DashboardService::for_user(
        &state.db,
        &user,
        &state.config.current_semester,
        Utc::now(),
        state.config.upcoming_limit,
    )
    .await?;

    Ok(Json(dashboard.into()))
}
