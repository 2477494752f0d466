use crate::{
    auth::CurrentUser,
    dtos::coursework::{AssignmentResponse, ExamResponse, StatusQueryParams},
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use database::services::coursework::CourseworkService;
use models::coursework::DeadlineStatus;

/// Assignments for every section the signed-in student is enrolled in
#[utoipa::path(
    get,
    path = "/assignments",
    params(StatusQueryParams),
    responses(
        (status = 200, description = "Assignments, soonest due first", body = Vec<AssignmentResponse>),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Coursework"
)]
pub async fn list_assignments(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<StatusQueryParams>,
) -> Result<Json<Vec<AssignmentResponse>>, ApiError> {
    let status = DeadlineStatus::from_query(params.status.as_deref());
    let assignments =
        CourseworkService::list_assignments(&state.db, user.id, status, Utc::now()).await?;

    Ok(Json(assignments.into_iter().map(Into::into).collect()))
}

/// Exams for every section the signed-in student is enrolled in
#[utoipa::path(
    get,
    path = "/exams",
    params(StatusQueryParams),
    responses(
        (status = 200, description = "Exams, soonest first", body = Vec<ExamResponse>),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Coursework"
)]
pub async fn list_exams(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<StatusQueryParams>,
) -> Result<Json<Vec<ExamResponse>>, ApiError> {
    let status = DeadlineStatus::from_query(params.status.as_deref());
    let exams = CourseworkService::list_exams(&state.db, user.id, status, Utc::now()).await?;

    Ok(Json(exams.into_iter().map(Into::into).collect()))
}
