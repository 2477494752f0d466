use crate::{
    auth::CurrentUser, dtos::schedule::MyScheduleResponse, error::ApiError, state::AppState,
};
use axum::{Json, extract::State};
use chrono::Utc;
use database::services::{coursework::CourseworkService, schedule::ScheduleService};

/// The signed-in student's week this semester, with what is due next
#[utoipa::path(
    get,
    path = "/my-schedule",
    responses(
        (status = 200, description = "Weekly schedule", body = MyScheduleResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedule"
)]
pub async fn my_schedule(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<MyScheduleResponse>, ApiError> {
    let semester = &state.config.current_semester;
    let limit = state.config.upcoming_limit;
    let now = Utc::now();

    let schedule = ScheduleService::weekly_schedule(&state.db, user.id, semester).await?;
    let section_ids = schedule.section_ids();

    let assignments =
        CourseworkService::upcoming_assignments(&state.db, &section_ids, now, limit).await?;
    let exams = CourseworkService::upcoming_exams(&state.db, &section_ids, now, limit).await?;

    Ok(Json(MyScheduleResponse::new(semester, schedule, assignments, exams)))
}
