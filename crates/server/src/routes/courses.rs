use crate::{
    dtos::catalog::{CatalogQueryParams, CourseDetailResponse, CourseResponse},
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use database::services::catalog::CatalogService;
use uuid::Uuid;

/// List courses, optionally filtered by department and a name, code, or description search
#[utoipa::path(
    get,
    path = "/courses",
    params(CatalogQueryParams),
    responses(
        (status = 200, description = "Courses", body = Vec<CourseResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CatalogQueryParams>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = CatalogService::list_courses(&state.db, params.department, params.search).await?;

    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Get a course and its sections this semester
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let detail = CatalogService::get_course(&state.db, id, &state.config.current_semester)
        .await?
        .ok_or_else(|| ApiError::not_found("Course"))?;

    Ok(Json(detail.into()))
}
