use crate::{
    dtos::catalog::{DepartmentDetailResponse, DepartmentResponse},
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use database::services::catalog::CatalogService;
use uuid::Uuid;

/// List all departments, ordered by code
#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "Departments", body = Vec<DepartmentResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn list_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<DepartmentResponse>>, ApiError> {
    let departments = CatalogService::list_departments(&state.db).await?;

    Ok(Json(departments.into_iter().map(Into::into).collect()))
}

/// Get a department with its faculty and courses
#[utoipa::path(
    get,
    path = "/departments/{id}",
    params(
        ("id" = Uuid, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department found", body = DepartmentDetailResponse),
        (status = 404, description = "Department not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DepartmentDetailResponse>, ApiError> {
    let detail = CatalogService::get_department(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Department"))?;

    Ok(Json(detail.into()))
}
