pub mod courses;
pub mod coursework;
pub mod dashboard;
pub mod departments;
pub mod faculty;
pub mod health;
pub mod profile;
pub mod root;
pub mod schedule;
pub mod sections;

use crate::state::AppState;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Routes anyone may call
pub fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(root::root))
        .routes(routes!(health::health))
        .routes(routes!(departments::list_departments))
        .routes(routes!(departments::get_department))
        .routes(routes!(faculty::list_faculty))
        .routes(routes!(faculty::get_faculty))
        .routes(routes!(courses::list_courses))
        .routes(routes!(courses::get_course))
        .routes(routes!(sections::get_section))
}

/// Routes that need a validated bearer token; wrap them in the OAuth2 layer
pub fn protected_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(sections::enrollment_status))
        .routes(routes!(sections::enroll))
        .routes(routes!(sections::drop_enrollment))
        .routes(routes!(schedule::my_schedule))
        .routes(routes!(coursework::list_assignments))
        .routes(routes!(coursework::list_exams))
        .routes(routes!(dashboard::dashboard))
        .routes(routes!(profile::get_profile, profile::update_profile))
}
