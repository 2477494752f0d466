use crate::{
    dtos::catalog::{CatalogQueryParams, FacultyDetailResponse, FacultyResponse},
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use database::services::catalog::CatalogService;
use uuid::Uuid;

/// List faculty, optionally filtered by department and a name or title search
#[utoipa::path(
    get,
    path = "/faculty",
    params(CatalogQueryParams),
    responses(
        (status = 200, description = "Faculty members", body = Vec<FacultyResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn list_faculty(
    State(state): State<AppState>,
    Query(params): Query<CatalogQueryParams>,
) -> Result<Json<Vec<FacultyResponse>>, ApiError> {
    let faculty = CatalogService::list_faculty(&state.db, params.department, params.search).await?;

    Ok(Json(faculty.into_iter().map(Into::into).collect()))
}

/// Get a faculty member and the classes they teach this semester
#[utoipa::path(
    get,
    path = "/faculty/{id}",
    params(
        ("id" = Uuid, Path, description = "Faculty ID")
    ),
    responses(
        (status = 200, description = "Faculty member found", body = FacultyDetailResponse),
        (status = 404, description = "Faculty member not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FacultyDetailResponse>, ApiError> {
    let detail = CatalogService::get_faculty(&state.db, id, &state.config.current_semester)
        .await?
        .ok_or_else(|| ApiError::not_found("Faculty member"))?;

    Ok(Json(detail.into()))
}
