use crate::{
    auth::CurrentUser,
    dtos::{
        catalog::{SectionDetailResponse, SectionResponse},
        enrollment::{EnrollmentActionResponse, EnrollmentStatusResponse},
        notice::Notice,
    },
    error::ApiError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use database::services::{catalog::CatalogService, enrollment::EnrollmentService};
use uuid::Uuid;

const AFTER_ENROLLMENT_CHANGE: &str = "/my-schedule";

fn section_page(id: Uuid) -> String {
    format!("/sections/{id}")
}

/// Get a section with its meeting times, assignments, and exams
#[utoipa::path(
    get,
    path = "/sections/{id}",
    params(
        ("id" = Uuid, Path, description = "Class section ID")
    ),
    responses(
        (status = 200, description = "Section found", body = SectionDetailResponse),
        (status = 404, description = "Section not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SectionDetailResponse>, ApiError> {
    let detail = CatalogService::get_section(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Class section"))?;

    Ok(Json(detail.into()))
}

/// Whether the signed-in user is enrolled in the section
#[utoipa::path(
    get,
    path = "/sections/{id}/enrollment",
    params(
        ("id" = Uuid, Path, description = "Class section ID")
    ),
    responses(
        (status = 200, description = "Enrollment status", body = EnrollmentStatusResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollment"
)]
pub async fn enrollment_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentStatusResponse>, ApiError> {
    let enrolled = EnrollmentService::is_enrolled(&state.db, user.id, id).await?;

    Ok(Json(EnrollmentStatusResponse {
        section_id: id,
        enrolled,
    }))
}

/// Enroll the signed-in user in a section
#[utoipa::path(
    post,
    path = "/sections/{id}/enroll",
    params(
        ("id" = Uuid, Path, description = "Class section ID")
    ),
    responses(
        (status = 200, description = "Enrolled", body = EnrollmentActionResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT", body = Notice),
        (status = 404, description = "Section not found", body = Notice),
        (status = 409, description = "Already enrolled or the section is full", body = Notice),
        (status = 500, description = "Internal server error", body = Notice)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollment"
)]
pub async fn enroll(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentActionResponse>, ApiError> {
    let enrolled = EnrollmentService::enroll(&state.db, user.id, id, Utc::now().date_naive())
        .await
        .map_err(|err| ApiError::from(err).with_redirect(section_page(id)))?;

    let notice = Notice::success(format!(
        "Successfully enrolled in {} {}.",
        enrolled.course.code, enrolled.section.section_number
    ))
    .redirect_to(AFTER_ENROLLMENT_CHANGE);

    Ok(Json(EnrollmentActionResponse {
        notice,
        section: SectionResponse::new(enrolled.section, Some(&enrolled.course), None),
    }))
}

/// Drop the signed-in user from a section
#[utoipa::path(
    post,
    path = "/sections/{id}/drop",
    params(
        ("id" = Uuid, Path, description = "Class section ID")
    ),
    responses(
        (status = 200, description = "Dropped", body = EnrollmentActionResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT", body = Notice),
        (status = 404, description = "Section not found", body = Notice),
        (status = 409, description = "Not enrolled in the section", body = Notice),
        (status = 500, description = "Internal server error", body = Notice)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollment"
)]
pub async fn drop_enrollment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentActionResponse>, ApiError> {
    let dropped = EnrollmentService::drop(&state.db, user.id, id)
        .await
        .map_err(|err| ApiError::from(err).with_redirect(section_page(id)))?;

    let notice = Notice::success(format!(
        "Successfully dropped {} {}.",
        dropped.course.code, dropped.section.section_number
    ))
    .redirect_to(AFTER_ENROLLMENT_CHANGE);

    Ok(Json(EnrollmentActionResponse {
        notice,
        section: SectionResponse::new(dropped.section, Some(&dropped.course), None),
    }))
}
